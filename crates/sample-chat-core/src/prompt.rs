//! Rendering fitted turns for prompt assembly.

use crate::turn::{Turn, TurnRole};
use serde::{Deserialize, Serialize};

/// Name attached to user example messages in [`ExampleStyle::NamedSystem`].
pub const EXAMPLE_USER_NAME: &str = "example_user";
/// Name attached to character example messages in [`ExampleStyle::NamedSystem`].
pub const EXAMPLE_ASSISTANT_NAME: &str = "example_assistant";

/// How sample turns are mapped onto chat-completion messages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExampleStyle {
    /// User turns become `user`, character turns become `assistant`.
    #[default]
    Native,
    /// Every turn becomes a `system` message; dialogue turns are tagged with
    /// `example_user` / `example_assistant` names.
    NamedSystem,
}

impl std::str::FromStr for ExampleStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "native" => Ok(ExampleStyle::Native),
            "named_system" | "system" => Ok(ExampleStyle::NamedSystem),
            other => Err(format!("unknown example style: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// A chat-completion message built from a sample turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl PromptMessage {
    fn from_turn(turn: &Turn, style: ExampleStyle) -> Self {
        let (role, name) = match (style, turn.role) {
            (_, TurnRole::System) => (PromptRole::System, None),
            (ExampleStyle::Native, TurnRole::User) => (PromptRole::User, None),
            (ExampleStyle::Native, TurnRole::Character) => (PromptRole::Assistant, None),
            (ExampleStyle::NamedSystem, TurnRole::User) => {
                (PromptRole::System, Some(EXAMPLE_USER_NAME.to_string()))
            }
            (ExampleStyle::NamedSystem, TurnRole::Character) => {
                (PromptRole::System, Some(EXAMPLE_ASSISTANT_NAME.to_string()))
            }
        };

        Self {
            role,
            name,
            content: turn.content.clone(),
        }
    }
}

/// Convert turns to chat-completion messages, preserving order.
pub fn to_prompt_messages(turns: &[Turn], style: ExampleStyle) -> Vec<PromptMessage> {
    turns
        .iter()
        .map(|turn| PromptMessage::from_turn(turn, style))
        .collect()
}

/// Render turns back into a `Name: content` transcript for text-completion
/// prompts. New-conversation notices are written as `<START>`.
pub fn format_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            if turn.is_new_conversation() {
                "<START>".to_string()
            } else {
                format!("{}: {}", turn.name, turn.content)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
