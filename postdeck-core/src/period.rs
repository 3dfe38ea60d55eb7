//! The displayed year/month and navigation between months.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::error::{DeckError, DeckResult};

/// The year+month currently displayed in the calendar.
///
/// Only validated instances exist: `new` is the sole entry point for
/// arbitrary input, so the month is always in 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> DeckResult<Period> {
        if !(1..=12).contains(&month) {
            return Err(DeckError::InvalidPeriod(month));
        }
        Ok(Period { year, month })
    }

    /// The current real-world month, from the local clock.
    pub fn current() -> Period {
        let today = Local::now().date_naive();
        Period {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by whole months, wrapping the year at both ends.
    pub fn shift(&self, delta: i32) -> Period {
        let months = self.year * 12 + self.month as i32 - 1 + delta;
        Period {
            year: months.div_euclid(12),
            month: (months.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("period holds a valid month")
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.shift(1).first_day();
        (next - self.first_day()).num_days() as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(matches!(Period::new(2024, 0), Err(DeckError::InvalidPeriod(0))));
        assert!(matches!(Period::new(2024, 13), Err(DeckError::InvalidPeriod(13))));
        assert!(Period::new(2024, 12).is_ok());
    }

    #[test]
    fn test_shift_wraps_year_forward_and_back() {
        let december = Period::new(2024, 12).unwrap();
        assert_eq!(december.shift(1), Period::new(2025, 1).unwrap());

        let january = Period::new(2024, 1).unwrap();
        assert_eq!(january.shift(-1), Period::new(2023, 12).unwrap());
    }

    #[test]
    fn test_twelve_forward_shifts_land_on_same_month_next_year() {
        let mut period = Period::new(2024, 12).unwrap();
        for _ in 0..12 {
            period = period.shift(1);
        }
        assert_eq!(period, Period::new(2025, 12).unwrap());
    }

    #[test]
    fn test_days_in_month_tracks_leap_years() {
        assert_eq!(Period::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(Period::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(Period::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(Period::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_contains_only_own_dates() {
        let period = Period::new(2024, 3).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()));
    }

    #[test]
    fn test_display_names_the_month() {
        assert_eq!(Period::new(2024, 3).unwrap().to_string(), "March 2024");
    }
}
