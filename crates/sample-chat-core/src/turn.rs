//! Turn types produced by the segmenter.

use serde::{Deserialize, Serialize};

/// Label used for system turns, both explicit (`System: ...`) and synthesized.
pub const SYSTEM_LABEL: &str = "System";

/// Content of the system turn emitted for every `<START>` marker.
pub const NEW_CONVERSATION_NOTICE: &str =
    "New conversation started. Previous conversations are examples only.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Character,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => "user",
            TurnRole::Character => "character",
        }
    }
}

/// One atomic, role-tagged unit of a sample conversation.
///
/// Turns are never split downstream: budget fitting includes or excludes a
/// turn as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    /// Speaker label exactly as matched in the transcript.
    pub name: String,
    pub content: String,
}

impl Turn {
    pub fn new(role: TurnRole, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, SYSTEM_LABEL, content)
    }

    pub fn user(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, name, content)
    }

    pub fn character(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(TurnRole::Character, name, content)
    }

    /// The notice turn that stands in for a `<START>` marker.
    pub fn new_conversation() -> Self {
        Self::system(NEW_CONVERSATION_NOTICE)
    }

    pub fn is_new_conversation(&self) -> bool {
        self.role == TurnRole::System && self.content == NEW_CONVERSATION_NOTICE
    }
}
