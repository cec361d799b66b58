//! Configuration file parser for ~/.config/linklux/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though a warning is logged for each so
//! typos do not go unnoticed.
use crate::flow::{FlowTimings, DEFAULT_COPIED_WINDOW, DEFAULT_SHORTEN_DELAY};
use crate::notify::{DEFAULT_TOAST_DURATION, DEFAULT_TOAST_LIMIT};
use crate::shortcode::{DEFAULT_CODE_LENGTH, DEFAULT_DOMAIN};
use crate::util::MAX_INPUT_LENGTH;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// Well-formed TOML with a value the app cannot use.
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Display domain prefixed to every fabricated code.
    pub domain: String,

    /// Characters per short code.
    pub code_length: usize,

    /// Simulated shortening delay in milliseconds.
    pub shorten_delay_ms: u64,

    /// How long the copy control stays in its copied state, in milliseconds.
    pub copied_window_ms: u64,

    /// How long a toast stays visible, in milliseconds.
    pub toast_duration_ms: u64,

    /// Toasts visible at once.
    pub toast_limit: usize,

    /// Maximum input length in bytes.
    pub max_input_length: usize,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            shorten_delay_ms: DEFAULT_SHORTEN_DELAY.as_millis() as u64,
            copied_window_ms: DEFAULT_COPIED_WINDOW.as_millis() as u64,
            toast_duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            toast_limit: DEFAULT_TOAST_LIMIT,
            max_input_length: MAX_INPUT_LENGTH,
            keybindings: HashMap::new(),
        }
    }
}

const KNOWN_KEYS: [&str; 9] = [
    "theme",
    "domain",
    "code_length",
    "shorten_delay_ms",
    "copied_window_ms",
    "toast_duration_ms",
    "toast_limit",
    "max_input_length",
    "keybindings",
];

/// Longest short code the alphabet sampler is asked for.
const MAX_CODE_LENGTH: usize = 32;

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Out-of-range values → `Err(ConfigError::Invalid)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            domain = %config.domain,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the flow or the display.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            return Err(ConfigError::Invalid {
                key: "domain",
                reason: "must not be empty".into(),
            });
        }
        if domain.contains("://") || domain.contains('/') || domain.contains(char::is_whitespace)
        {
            return Err(ConfigError::Invalid {
                key: "domain",
                reason: format!("'{}' must be a bare host name like 'linklux.io'", domain),
            });
        }
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::Invalid {
                key: "code_length",
                reason: format!("must be between 1 and {}", MAX_CODE_LENGTH),
            });
        }
        if self.max_input_length == 0 {
            return Err(ConfigError::Invalid {
                key: "max_input_length",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn flow_timings(&self) -> FlowTimings {
        FlowTimings {
            shorten_delay: Duration::from_millis(self.shorten_delay_ms),
            copied_window: Duration::from_millis(self.copied_window_ms),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================
