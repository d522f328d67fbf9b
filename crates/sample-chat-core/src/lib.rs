//! sample-chat-core - Sample dialogue segmentation and budget fitting
//!
//! Turns a character card's example dialogue into role-tagged turns that can
//! be spliced into a model prompt:
//! - `segmenter` - transcript → turns (`<START>` markers, speaker lines, preambles)
//! - `budget` - keep the most recent turns that fit a token budget
//! - `placeholders` - `{{char}}` / `{{user}}` substitution
//! - `prompt` - turns → chat-completion messages or plain text
//! - `config` - file and environment configuration
//!
//! # Example
//!
//! ```
//! use sample_chat_core::{split_sample_chat, SampleChatRequest, TurnRole};
//!
//! let request = SampleChatRequest::new("<START>\nSam: hey\nVader: hi!", "Vader", "Sam");
//! let result = split_sample_chat(&request, |turn| turn.content.len() as u32).unwrap();
//! assert_eq!(result.additions.len(), 3);
//! assert_eq!(result.additions[2].role, TurnRole::Character);
//! ```

pub mod budget;
pub mod config;
pub mod error;
pub mod placeholders;
pub mod prompt;
pub mod segmenter;
pub mod turn;

pub use budget::{
    fit, fit_with_counter, try_fit, FitResult, HeuristicTokenCounter, SharedTokenCounter,
    TokenCounter,
};
pub use config::SampleChatConfig;
pub use error::{BudgetError, ConfigError, FitError};
pub use placeholders::expand_placeholders;
pub use prompt::{format_transcript, to_prompt_messages, ExampleStyle, PromptMessage, PromptRole};
pub use segmenter::{segment, SampleChatSegmenter};
pub use turn::{Turn, TurnRole, NEW_CONVERSATION_NOTICE, SYSTEM_LABEL};

use serde::{Deserialize, Serialize};

/// Input for [`split_sample_chat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleChatRequest {
    pub sample_chat: String,
    pub character_name: String,
    pub user_name: String,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default = "default_expand_placeholders")]
    pub expand_placeholders: bool,
}

fn default_expand_placeholders() -> bool {
    true
}

impl SampleChatRequest {
    pub fn new(
        sample_chat: impl Into<String>,
        character_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            sample_chat: sample_chat.into(),
            character_name: character_name.into(),
            user_name: user_name.into(),
            budget: None,
            expand_placeholders: true,
        }
    }

    pub fn with_budget(mut self, budget: Option<i64>) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_placeholders(mut self, expand: bool) -> Self {
        self.expand_placeholders = expand;
        self
    }
}

/// Expand placeholders, segment the transcript and fit it into the budget.
pub fn split_sample_chat<F>(request: &SampleChatRequest, cost: F) -> Result<FitResult, BudgetError>
where
    F: FnMut(&Turn) -> u32,
{
    if let Some(budget) = request.budget {
        if budget < 0 {
            return Err(BudgetError::InvalidArgument { budget });
        }
    }

    let segmenter = SampleChatSegmenter::new(&request.character_name, &request.user_name);
    let turns = if request.expand_placeholders {
        let expanded = expand_placeholders(
            &request.sample_chat,
            &request.character_name,
            &request.user_name,
        );
        segmenter.segment(&expanded)
    } else {
        segmenter.segment(&request.sample_chat)
    };

    fit(&turns, request.budget, cost)
}
