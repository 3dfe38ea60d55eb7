use std::sync::Arc;

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, PostsGateway};

use crate::commands::parse_post_id;
use crate::config::DeckConfig;

pub async fn run(
    gateway: Arc<dyn PostsGateway>,
    config: &DeckConfig,
    id: String,
    yes: bool,
) -> Result<()> {
    if !yes {
        let proceed = Confirm::new()
            .with_prompt(format!("Delete post #{id}?"))
            .default(false)
            .interact()?;
        if !proceed {
            return Ok(());
        }
    }

    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    controller.delete(&parse_post_id(&id)).await?;

    println!("{} post #{id}", "Deleted".red());
    Ok(())
}
