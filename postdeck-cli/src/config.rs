//! Global postdeck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use config::{Config, File};
use serde::Deserialize;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global configuration at ~/.config/postdeck/config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct DeckConfig {
    /// Base URL of the dashboard backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// First column of the month grid: "sunday" (default) or "monday".
    pub week_start: Option<String>,
}

impl DeckConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("postdeck");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<DeckConfig> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: DeckConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .context("Could not read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }

    pub fn week_start(&self) -> Weekday {
        match self.week_start.as_deref() {
            Some("monday") => Weekday::Mon,
            _ => Weekday::Sun,
        }
    }

    /// Create a default config file with all options commented out.
    fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# postdeck configuration

# Dashboard backend to talk to:
# server_url = \"{DEFAULT_SERVER_URL}\"

# First day of the calendar week (\"sunday\" or \"monday\"):
# week_start = \"sunday\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }
}
