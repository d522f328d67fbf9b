//! Error types for budget fitting and configuration.

use std::io;
use thiserror::Error;

/// Errors raised by budget fitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// The budget was negative.
    #[error("Invalid budget {budget}: budget must be a non-negative integer")]
    InvalidArgument { budget: i64 },
}

/// Errors raised by fitting with a fallible cost oracle.
///
/// Oracle failures are passed through untouched.
#[derive(Debug, Error)]
pub enum FitError<E> {
    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error("Cost oracle failed: {0}")]
    Oracle(#[source] E),
}

/// Errors raised while loading [`crate::config::SampleChatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}
