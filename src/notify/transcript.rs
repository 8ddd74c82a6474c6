//! Transcript excerpts
//!
//! Claude Code writes each session as JSONL; assistant turns look like
//! `{"type":"assistant","message":{"content":[{"type":"text","text":"..."}]}}`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct Entry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Blocks(Vec<Block>),
}

impl Default for Content {
    fn default() -> Self {
        Content::Blocks(Vec::new())
    }
}

#[derive(Deserialize)]
struct Block {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl Content {
    fn text(self) -> Option<String> {
        let text = match self {
            Content::Text(text) => text,
            Content::Blocks(blocks) => blocks
                .into_iter()
                .filter(|b| b.kind == "text")
                .filter_map(|b| b.text)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Text of the last assistant message in a JSONL transcript.
///
/// Unreadable files and lines that are not transcript entries are skipped.
pub fn last_assistant_text(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    last_assistant_text_in(&content)
}

pub(crate) fn last_assistant_text_in(content: &str) -> Option<String> {
    content.lines().rev().find_map(|line| {
        let entry: Entry = serde_json::from_str(line).ok()?;
        if entry.kind != "assistant" {
            return None;
        }
        entry.message?.content.text()
    })
}

/// Collapse whitespace and cut to at most `max_chars` characters,
/// ending in an ellipsis when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}
