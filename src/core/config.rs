//! Environment-based configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,
    /// Optional guild ID for instant command registration during development
    pub discord_guild_id: Option<String>,
    /// Path of the durable schedule file
    pub data_path: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `DISCORD_TOKEN` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN environment variable is required")?;

        let discord_guild_id = std::env::var("DISCORD_GUILD_ID").ok().filter(|s| !s.is_empty());

        let data_path =
            std::env::var("COURSE_DATA_PATH").unwrap_or_else(|_| "course_data.json".to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            data_path,
            log_level,
        })
    }
}
