use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use postdeck_core::{CalendarController, Platform, PostPatch, PostsGateway, ScheduledAt};

use crate::commands::parse_post_id;
use crate::config::DeckConfig;
use crate::render::Render;

pub async fn run(
    gateway: Arc<dyn PostsGateway>,
    config: &DeckConfig,
    id: String,
    title: Option<String>,
    content: Option<String>,
    platform: Option<String>,
    at: Option<String>,
) -> Result<()> {
    let platform = match platform {
        Some(raw) => match Platform::from_str(&raw) {
            Ok(p) => Some(p),
            Err(_) => bail!("unknown platform '{raw}'"),
        },
        None => None,
    };

    if let Some(raw) = &at {
        if let Err(reason) = ScheduledAt::parse(raw, None) {
            bail!("invalid schedule date: {reason}");
        }
    }

    let patch = PostPatch {
        title,
        content,
        platform,
        scheduled_at: at,
        ..Default::default()
    };
    if patch.is_empty() {
        bail!("nothing to change; pass at least one of --title, --content, --platform, --at");
    }

    let controller = CalendarController::new(gateway).with_week_start(config.week_start());
    let post = controller.update(&parse_post_id(&id), &patch).await?;

    println!("{} {}", "Updated".green(), post.render().trim_start());
    Ok(())
}
