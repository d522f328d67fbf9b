//! Transcript segmentation.
//!
//! Splits a free-form sample dialogue into role-tagged turns. Each line is
//! classified as a `<START>` marker, a speaker line (`Name: text`), or a
//! continuation of whatever turn is currently open. Text that appears before
//! any speaker line (at the top of the transcript or right after a marker)
//! becomes a standalone system turn.

use crate::turn::{Turn, TurnRole, SYSTEM_LABEL};

const START_MARKER: &str = "<START>";

/// Classification of a single transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Marker,
    Speaker {
        role: TurnRole,
        label: &'a str,
        text: &'a str,
    },
    Continuation(&'a str),
}

/// Turn being accumulated while scanning.
#[derive(Debug)]
struct OpenTurn {
    role: TurnRole,
    name: String,
    content: String,
}

/// Segments sample-chat transcripts for a given character/user pair.
///
/// Speaker labels are matched with exact case so that ordinary sentences
/// containing a colon are not mistaken for attributions.
#[derive(Debug, Clone)]
pub struct SampleChatSegmenter {
    character_name: String,
    user_name: String,
}

impl SampleChatSegmenter {
    pub fn new(character_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            character_name: character_name.into(),
            user_name: user_name.into(),
        }
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Segment a transcript into turns, oldest first.
    ///
    /// Never fails; an empty or whitespace-only transcript yields no turns.
    pub fn segment(&self, transcript: &str) -> Vec<Turn> {
        let normalized = normalize_line_endings(transcript);

        let mut turns: Vec<Turn> = Vec::new();
        let mut open: Option<OpenTurn> = None;
        let mut preamble = String::new();

        for raw in normalized.split('\n') {
            let line = self.classify(raw);
            tracing::trace!(?line, "classified sample chat line");

            match line {
                Line::Marker => {
                    close_turn(&mut turns, open.take());
                    flush_preamble(&mut turns, &mut preamble);
                    turns.push(Turn::new_conversation());
                }
                Line::Speaker { role, label, text } => {
                    close_turn(&mut turns, open.take());
                    flush_preamble(&mut turns, &mut preamble);
                    open = Some(OpenTurn {
                        role,
                        name: label.to_string(),
                        content: text.to_string(),
                    });
                }
                Line::Continuation(text) => match open.as_mut() {
                    Some(turn) => append_line(&mut turn.content, text),
                    None => append_line(&mut preamble, text),
                },
            }
        }

        close_turn(&mut turns, open.take());
        flush_preamble(&mut turns, &mut preamble);

        tracing::debug!(
            turns = turns.len(),
            character = %self.character_name,
            user = %self.user_name,
            "segmented sample chat"
        );
        turns
    }

    fn classify<'a>(&'a self, raw: &'a str) -> Line<'a> {
        let trimmed = raw.trim();

        if trimmed.eq_ignore_ascii_case(START_MARKER) {
            return Line::Marker;
        }

        let labels = [
            (TurnRole::System, SYSTEM_LABEL),
            (TurnRole::User, self.user_name.as_str()),
            (TurnRole::Character, self.character_name.as_str()),
        ];

        for (role, label) in labels {
            if let Some(text) = strip_speaker_label(trimmed, label) {
                return Line::Speaker { role, label, text };
            }
        }

        Line::Continuation(raw)
    }
}

/// Segment a transcript using the given character and user names.
pub fn segment(transcript: &str, character_name: &str, user_name: &str) -> Vec<Turn> {
    SampleChatSegmenter::new(character_name, user_name).segment(transcript)
}

/// Returns the text after `label:` if `line` is attributed to `label`.
fn strip_speaker_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    if label.is_empty() {
        return None;
    }
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim_start)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn append_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

fn close_turn(turns: &mut Vec<Turn>, open: Option<OpenTurn>) {
    let Some(turn) = open else {
        return;
    };

    let content = turn.content.trim();
    if content.is_empty() {
        tracing::debug!(speaker = %turn.name, "discarding sample chat turn with empty content");
        return;
    }

    turns.push(Turn::new(turn.role, turn.name, content));
}

fn flush_preamble(turns: &mut Vec<Turn>, preamble: &mut String) {
    let content = preamble.trim();
    if !content.is_empty() {
        turns.push(Turn::system(content));
    }
    preamble.clear();
}
