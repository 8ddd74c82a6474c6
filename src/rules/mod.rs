//! Danger rules for the safety hook
//!
//! A rule is a regex over one view of the command, optionally narrowed by a
//! keyword list and a second pattern. The table in [`dangerous`] is ordered;
//! the first match wins.

pub mod dangerous;

use serde::Serialize;
use std::fmt;

/// What kind of harm a rule guards against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rce,
    Deletion,
    Exfiltration,
    Persistence,
    PrivilegeEscalation,
    SystemModification,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rce => "rce",
            Category::Deletion => "deletion",
            Category::Exfiltration => "exfiltration",
            Category::Persistence => "persistence",
            Category::PrivilegeEscalation => "privilege_escalation",
            Category::SystemModification => "system_modification",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rendering of the command a pattern runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Lowercased
    Lower,
    /// Runs of whitespace collapsed to one space, case kept
    Normalised,
    /// Exactly as received
    Raw,
}

/// A regex bound to a view
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub view: View,
    pub regex: &'static str,
}

impl Pattern {
    pub const fn lower(regex: &'static str) -> Self {
        Self {
            view: View::Lower,
            regex,
        }
    }

    pub const fn normalised(regex: &'static str) -> Self {
        Self {
            view: View::Normalised,
            regex,
        }
    }

    pub const fn raw(regex: &'static str) -> Self {
        Self {
            view: View::Raw,
            regex,
        }
    }
}

/// A danger rule definition
#[derive(Debug, Clone, Copy)]
pub struct DangerRule {
    /// Unique identifier for this rule
    pub id: &'static str,

    pub category: Category,

    /// Pattern that must match
    pub trigger: Pattern,

    /// If non-empty, one of these must occur in the lowercased command.
    /// The first one found fills `{keyword}` in the reason.
    pub keywords: &'static [&'static str],

    /// Additional pattern that must also match
    pub requires: Option<Pattern>,

    /// Human-readable reason shown in the confirmation prompt
    pub reason: &'static str,
}

impl DangerRule {
    /// Create a plain single-pattern rule
    pub const fn new(
        id: &'static str,
        category: Category,
        trigger: Pattern,
        reason: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            trigger,
            keywords: &[],
            requires: None,
            reason,
        }
    }

    pub const fn with_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.keywords = keywords;
        self
    }

    pub const fn requiring(mut self, pattern: Pattern) -> Self {
        self.requires = Some(pattern);
        self
    }
}
