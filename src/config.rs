//! Configuration management for Chartroom
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChartroomError, Result};
use crate::mode::{InterviewMode, DEFAULT_PERSONA};
use crate::session::DEFAULT_REVEAL_DELAY_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest accepted request timeout (seconds)
const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Longest accepted reveal delay (milliseconds)
const MAX_REVEAL_DELAY_MS: u64 = 10_000;

/// Main configuration structure for Chartroom
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Session defaults and presentation settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the Chartroom backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Mode selected at startup: "board_investors" or "interview_1on1"
    #[serde(default = "default_mode")]
    pub default_mode: String,

    /// Submode selected at startup
    #[serde(default)]
    pub default_submode: String,

    /// Persona selected at startup
    #[serde(default = "default_persona")]
    pub default_persona: String,

    /// Pause between revealed replies (milliseconds, 0 disables)
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,
}

fn default_mode() -> String {
    InterviewMode::default().as_str().to_string()
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

fn default_reveal_delay() -> u64 {
    DEFAULT_REVEAL_DELAY_MS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            default_submode: String::new(),
            default_persona: default_persona(),
            reveal_delay_ms: default_reveal_delay(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChartroomError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChartroomError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CHARTROOM_BASE_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CHARTROOM_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CHARTROOM_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(mode) = std::env::var("CHARTROOM_MODE") {
            self.session.default_mode = mode;
        }

        if let Ok(submode) = std::env::var("CHARTROOM_SUBMODE") {
            self.session.default_submode = submode;
        }

        if let Ok(persona) = std::env::var("CHARTROOM_PERSONA") {
            self.session.default_persona = persona;
        }

        if let Ok(delay) = std::env::var("CHARTROOM_REVEAL_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.session.reveal_delay_ms = value;
            } else {
                tracing::warn!("Invalid CHARTROOM_REVEAL_DELAY_MS: {}", delay);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!("Using server override from CLI: {}", server);
            self.server.base_url = server.clone();
        }
    }

    /// Mode selected at startup
    ///
    /// # Errors
    ///
    /// Returns error if `session.default_mode` is not a known mode
    pub fn initial_mode(&self) -> Result<InterviewMode> {
        InterviewMode::parse_str(&self.session.default_mode)
            .map_err(|e| ChartroomError::Config(e).into())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.server.base_url).map_err(|e| {
            ChartroomError::Config(format!(
                "Invalid server.base_url {}: {}",
                self.server.base_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ChartroomError::Config(format!(
                "server.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.server.timeout_seconds == 0 {
            return Err(ChartroomError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ChartroomError::Config(format!(
                "server.timeout_seconds must be less than or equal to {}",
                MAX_TIMEOUT_SECONDS
            ))
            .into());
        }

        self.initial_mode()?;

        if self.session.default_persona.trim().is_empty() {
            return Err(ChartroomError::Config(
                "session.default_persona cannot be empty".to_string(),
            )
            .into());
        }

        if self.session.reveal_delay_ms > MAX_REVEAL_DELAY_MS {
            return Err(ChartroomError::Config(format!(
                "session.reveal_delay_ms must be less than or equal to {}",
                MAX_REVEAL_DELAY_MS
            ))
            .into());
        }

        Ok(())
    }
}
