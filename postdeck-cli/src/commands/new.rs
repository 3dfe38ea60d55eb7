use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, Platform, PostDraft, PostsGateway, ScheduledAt};

use crate::config::DeckConfig;
use crate::render::Render;

pub async fn run(
    gateway: Arc<dyn PostsGateway>,
    config: &DeckConfig,
    title: Option<String>,
    content: Option<String>,
    platform: Option<String>,
    at: Option<String>,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => Input::new().with_prompt("Title").interact_text()?,
    };

    let content = match content {
        Some(c) => c,
        None => Input::new()
            .with_prompt("Content")
            .allow_empty(true)
            .interact_text()?,
    };

    let platform = match platform {
        Some(raw) => match Platform::from_str(&raw) {
            Ok(p) => p,
            Err(_) => bail!("unknown platform '{raw}' (expected one of: {})", names()),
        },
        None => {
            let picked = Select::new()
                .with_prompt("Platform")
                .items(&Platform::ALL.map(|p| p.as_str()))
                .default(0)
                .interact()?;
            Platform::ALL[picked]
        }
    };

    let at = match at {
        Some(a) => a,
        None => Input::new()
            .with_prompt("Schedule for (e.g. 2026-09-03 14:00)")
            .interact_text()?,
    };

    // Catch a bad date locally instead of round-tripping to the server.
    if let Err(reason) = ScheduledAt::parse(&at, None) {
        bail!("invalid schedule date: {reason}");
    }

    let draft = PostDraft {
        title,
        content,
        platform,
        scheduled_at: at,
        timezone: None,
        hashtags: Vec::new(),
    };

    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    let post = controller.create(&draft).await?;

    println!("{} {}", "Scheduled".green(), post.render().trim_start());
    Ok(())
}

fn names() -> String {
    Platform::ALL.map(|p| p.as_str()).join(", ")
}
