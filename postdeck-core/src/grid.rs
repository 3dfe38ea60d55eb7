//! Month grid construction.
//!
//! Pure date math: no network, no shared state. The same period always
//! yields the same cells.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::period::Period;

/// One grid square. Fill days from adjacent months carry `in_month = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// Cells for a 7-column month view: leading fill from the previous month's
/// tail, one cell per day of the month, then trailing fill from the next
/// month's head until the count is a multiple of 7.
pub fn month_grid(period: Period, week_start: Weekday) -> Vec<CalendarCell> {
    let first = period.first_day();
    let leading = days_from_week_start(first.weekday(), week_start);
    let total = (leading + period.days_in_month()).div_ceil(7) * 7;

    let start = first - Days::new(leading as u64);
    (0..total)
        .map(|offset| {
            let date = start + Days::new(offset as u64);
            CalendarCell {
                date,
                in_month: period.contains(date),
            }
        })
        .collect()
}

fn days_from_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_grid_length_is_always_a_multiple_of_seven() {
        for year in [1999, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let cells = month_grid(period(year, month), Weekday::Sun);
                assert_eq!(cells.len() % 7, 0, "{year}-{month:02}");
                assert!(cells.len() >= 28);
            }
        }
    }

    #[test]
    fn test_every_day_of_the_month_appears_exactly_once_in_order() {
        for month in 1..=12 {
            let p = period(2024, month);
            let days: Vec<u32> = month_grid(p, Weekday::Sun)
                .iter()
                .filter(|c| c.in_month)
                .map(|c| c.date.day())
                .collect();
            let expected: Vec<u32> = (1..=p.days_in_month()).collect();
            assert_eq!(days, expected, "2024-{month:02}");
        }
    }

    #[test]
    fn test_leap_day_present_only_in_leap_years() {
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert!(
            month_grid(period(2024, 2), Weekday::Sun)
                .iter()
                .any(|c| c.date == feb_29 && c.in_month)
        );
        assert!(
            !month_grid(period(2023, 2), Weekday::Sun)
                .iter()
                .any(|c| c.in_month && c.date.day() == 29)
        );
    }

    #[test]
    fn test_leading_cells_come_from_previous_month() {
        // March 2024 starts on a Friday; a Sunday-first grid leads with
        // Feb 25..29.
        let cells = month_grid(period(2024, 3), Weekday::Sun);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert!(!cells[0].in_month);
        assert_eq!(cells[5].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(cells[5].in_month);
    }

    #[test]
    fn test_week_start_shifts_the_leading_fill() {
        // July 2024 starts on a Monday: no fill when weeks start Monday,
        // one leading cell when they start Sunday.
        let monday_first = month_grid(period(2024, 7), Weekday::Mon);
        assert_eq!(monday_first[0].date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(monday_first.len(), 35);

        let sunday_first = month_grid(period(2024, 7), Weekday::Sun);
        assert_eq!(sunday_first[0].date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert!(!sunday_first[0].in_month);
    }

    #[test]
    fn test_grid_is_deterministic() {
        let a = month_grid(period(2024, 3), Weekday::Sun);
        let b = month_grid(period(2024, 3), Weekday::Sun);
        assert_eq!(a, b);
    }
}
