use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, PostsGateway};

use crate::config::DeckConfig;
use crate::render::Render;

pub async fn run(gateway: Arc<dyn PostsGateway>, config: &DeckConfig) -> Result<()> {
    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    controller.initialize().await?;

    let today = Local::now().date_naive();
    let view = controller.view_model();
    let posts = view
        .cells
        .iter()
        .find(|c| c.date == today)
        .map(|c| c.posts.clone())
        .unwrap_or_default();

    if posts.is_empty() {
        println!("{}", "No posts scheduled for today".dimmed());
        return Ok(());
    }

    println!("{}", format!("Today, {}", today.format("%b %-d")).bold());
    for post in &posts {
        println!("{}", post.render());
    }

    Ok(())
}
