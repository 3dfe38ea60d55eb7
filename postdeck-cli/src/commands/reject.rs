use std::sync::Arc;

use anyhow::Result;
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, PostsGateway};

use crate::commands::parse_post_id;
use crate::config::DeckConfig;
use crate::render::Render;

pub async fn run(gateway: Arc<dyn PostsGateway>, config: &DeckConfig, id: String) -> Result<()> {
    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    let post = controller.reject(&parse_post_id(&id)).await?;

    println!("{} {}", "Rejected".red(), post.render().trim_start());
    Ok(())
}
