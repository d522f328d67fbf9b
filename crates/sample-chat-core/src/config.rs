use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::budget::HeuristicTokenCounter;
use crate::error::ConfigError;
use crate::prompt::ExampleStyle;

pub const ENV_BUDGET: &str = "SAMPLE_CHAT_BUDGET";
pub const ENV_STYLE: &str = "SAMPLE_CHAT_STYLE";
pub const ENV_EXPAND_PLACEHOLDERS: &str = "SAMPLE_CHAT_EXPAND_PLACEHOLDERS";

/// Knobs for the sample-chat pipeline.
///
/// Resolution order: defaults, then an optional JSON or TOML file, then
/// `SAMPLE_CHAT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleChatConfig {
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub example_style: ExampleStyle,
    #[serde(default = "default_true")]
    pub expand_placeholders: bool,
    #[serde(default)]
    pub counter: HeuristicTokenCounter,
}

fn default_true() -> bool {
    true
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for SampleChatConfig {
    fn default() -> Self {
        Self {
            budget: None,
            example_style: ExampleStyle::default(),
            expand_placeholders: true,
            counter: HeuristicTokenCounter::default(),
        }
    }
}

impl SampleChatConfig {
    /// Load a config file, picking the format from its extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Defaults, overlaid with `path` (when given) and then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `SAMPLE_CHAT_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BUDGET) {
            let trimmed = value.trim();
            self.budget = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_BUDGET.to_string(),
                    value: value.clone(),
                })?)
            };
        }
        if let Some(value) = lookup(ENV_STYLE) {
            self.example_style = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_STYLE.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_EXPAND_PLACEHOLDERS) {
            self.expand_placeholders = parse_bool_env(&value);
        }
        Ok(())
    }
}
