use std::sync::Arc;

use anyhow::Result;
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, PostsGateway};

use crate::config::DeckConfig;
use crate::render::Render;

pub async fn run(gateway: Arc<dyn PostsGateway>, config: &DeckConfig) -> Result<()> {
    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    controller.initialize().await?;

    let pending = controller.pending();
    if pending.is_empty() {
        println!("{}", "Nothing waiting for approval".dimmed());
        return Ok(());
    }

    println!("{}", "Waiting for approval".bold());
    for post in &pending {
        println!("{}", post.render());
        if !post.content.is_empty() {
            println!("      {}", post.content.dimmed());
        }
    }

    Ok(())
}
