//! Command-line front end for the postdeck scheduling calendar.

mod client;
mod commands;
mod config;
mod render;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use postdeck_core::PostsGateway;
use tracing_subscriber::EnvFilter;

use crate::client::HttpPostsGateway;
use crate::config::DeckConfig;

#[derive(Parser)]
#[command(name = "postdeck", version, about = "Schedule and review social media posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar for a month (defaults to the current one)
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Start each week on Monday instead of Sunday
        #[arg(long)]
        weeks_start_monday: bool,
    },
    /// List today's scheduled posts
    Today,
    /// List posts waiting for approval
    Pending,
    /// Schedule a new post
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        /// Date and time, e.g. "2026-09-03 14:00"
        #[arg(long)]
        at: Option<String>,
    },
    /// Change an existing post
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        at: Option<String>,
    },
    /// Approve a pending post
    Approve { id: String },
    /// Reject a pending post
    Reject { id: String },
    /// Delete a post
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = DeckConfig::load()?;
    let gateway: Arc<dyn PostsGateway> = Arc::new(HttpPostsGateway::new(&config.server_url));

    match cli.command {
        Commands::Month {
            year,
            month,
            weeks_start_monday,
        } => commands::month::run(gateway, &config, year, month, weeks_start_monday).await,
        Commands::Today => commands::today::run(gateway, &config).await,
        Commands::Pending => commands::pending::run(gateway, &config).await,
        Commands::New {
            title,
            content,
            platform,
            at,
        } => commands::new::run(gateway, &config, title, content, platform, at).await,
        Commands::Edit {
            id,
            title,
            content,
            platform,
            at,
        } => commands::edit::run(gateway, &config, id, title, content, platform, at).await,
        Commands::Approve { id } => commands::approve::run(gateway, &config, id).await,
        Commands::Reject { id } => commands::reject::run(gateway, &config, id).await,
        Commands::Delete { id, yes } => commands::delete::run(gateway, &config, id, yes).await,
    }
}
