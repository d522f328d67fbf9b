//! Token counting for budget fitting.
//!
//! Any `Fn(&Turn) -> u32` can act as the cost oracle; this module provides a
//! trait for reusable counters and a heuristic estimator (chars/4 + 10%
//! margin) for callers without a model-specific tokenizer.

use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for token counting implementations.
pub trait TokenCounter: Send + Sync {
    /// Count tokens in a single turn.
    fn count_turn(&self, turn: &Turn) -> u32;

    /// Count tokens in multiple turns.
    fn count_turns(&self, turns: &[Turn]) -> u32 {
        turns
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(self.count_turn(t)))
    }

    /// Count tokens in a plain text string.
    fn count_text(&self, text: &str) -> u32;
}

/// Heuristic token counter using character-based estimation.
///
/// Uses the approximation: tokens ≈ characters / 4, with a 10% safety margin
/// plus a fixed per-turn overhead for the role and speaker name framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicTokenCounter {
    /// Characters per token ratio (default: 4)
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: f64,
    /// Safety margin multiplier (default: 1.1 = 10% extra)
    #[serde(default = "default_safety_margin")]
    pub safety_margin: f64,
    /// Framing overhead per turn in tokens
    #[serde(default = "default_metadata_overhead")]
    pub metadata_overhead: u32,
}

fn default_chars_per_token() -> f64 {
    4.0
}

fn default_safety_margin() -> f64 {
    1.1
}

fn default_metadata_overhead() -> u32 {
    4
}

impl HeuristicTokenCounter {
    /// Create a new heuristic counter with custom parameters.
    pub fn new(chars_per_token: f64, safety_margin: f64, metadata_overhead: u32) -> Self {
        Self {
            chars_per_token,
            safety_margin,
            metadata_overhead,
        }
    }

    /// Create with default parameters (chars/4 + 10% margin + 4 tokens of framing).
    pub fn with_defaults() -> Self {
        Self {
            chars_per_token: default_chars_per_token(),
            safety_margin: default_safety_margin(),
            metadata_overhead: default_metadata_overhead(),
        }
    }
}

impl Default for HeuristicTokenCounter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TokenCounter for HeuristicTokenCounter {
    fn count_turn(&self, turn: &Turn) -> u32 {
        self.count_text(&turn.content)
            .saturating_add(self.count_text(&turn.name))
            .saturating_add(self.metadata_overhead)
    }

    fn count_text(&self, text: &str) -> u32 {
        if text.is_empty() || self.chars_per_token <= 0.0 {
            return 0;
        }

        let char_count = text.chars().count() as f64;
        let base_tokens = char_count / self.chars_per_token;
        let adjusted_tokens = base_tokens * self.safety_margin;

        adjusted_tokens.ceil() as u32
    }
}

/// Arc-wrapped token counter for easy sharing.
pub type SharedTokenCounter = Arc<dyn TokenCounter>;
