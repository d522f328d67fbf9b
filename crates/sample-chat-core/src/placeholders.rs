//! Placeholder substitution for character cards.
//!
//! Sample chats are usually authored against `{{char}}` / `{{user}}`
//! placeholders (older cards use `<BOT>` / `<USER>`). Expanding them before
//! segmentation lets `{{char}}: hello` lines be recognized as speaker lines.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static CHAR_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{char\}\}|<BOT>").expect("valid char placeholder regex"));

static USER_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{user\}\}|<USER>").expect("valid user placeholder regex"));

/// Replace character and user placeholders with the supplied names.
pub fn expand_placeholders(text: &str, character_name: &str, user_name: &str) -> String {
    let with_char = CHAR_PLACEHOLDER.replace_all(text, NoExpand(character_name));
    USER_PLACEHOLDER
        .replace_all(&with_char, NoExpand(user_name))
        .into_owned()
}
