use std::sync::Arc;

use anyhow::Result;
use chrono::Weekday;
use postdeck_core::{CalendarController, Period, PostsGateway};

use crate::config::DeckConfig;
use crate::render::{Render, render_schedule};

pub async fn run(
    gateway: Arc<dyn PostsGateway>,
    config: &DeckConfig,
    year: Option<i32>,
    month: Option<u32>,
    weeks_start_monday: bool,
) -> Result<()> {
    let current = Period::current();
    let period = Period::new(
        year.unwrap_or_else(|| current.year()),
        month.unwrap_or_else(|| current.month()),
    )?;

    let week_start = if weeks_start_monday {
        Weekday::Mon
    } else {
        config.week_start()
    };
    let controller = CalendarController::starting_at(gateway, period).with_week_start(week_start);

    // Render even when the fetch fails: the view model degrades to an
    // empty grid with an error note instead of nothing at all.
    let fetch_result = controller.initialize().await;

    let view = controller.view_model();
    println!("{}", view.render());

    let schedule = render_schedule(&view);
    if !schedule.is_empty() {
        println!();
        println!("{schedule}");
    }

    fetch_result?;
    Ok(())
}
