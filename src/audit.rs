//! JSONL audit logging for claude-hooks
//!
//! Records every decision made by either hook to a JSONL file. Secrets that
//! appear in commands are redacted before they are written.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::HookInput;
use crate::notify::{NotificationEvent, Outcome};
use crate::output::{Decision, PARSE_ERROR_RULE};
use crate::rules::Category;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Asked,
    Blocked,
    Disabled,
    Notified,
    Suppressed,
    Error,
}

/// Which hook wrote the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Safety,
    Notify,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub hook: HookKind,

    pub level: LogLevel,

    /// Tool name (safety) or event kind (notify)
    pub tool: String,

    /// Rule ID that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Summary of the input, secrets redacted
    pub input_summary: String,

    /// Reason for the decision
    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Entry for a safety decision
    pub fn for_decision(input: &HookInput, decision: &Decision, disabled: bool) -> Self {
        let level = if disabled {
            LogLevel::Disabled
        } else {
            match decision {
                Decision::Allow { .. } => LogLevel::Allowed,
                Decision::Ask { .. } => LogLevel::Asked,
                Decision::Deny { .. } => LogLevel::Blocked,
            }
        };

        Self {
            timestamp: Utc::now(),
            hook: HookKind::Safety,
            level,
            tool: input.tool_name.clone(),
            rule_id: decision.rule_id().map(String::from),
            category: decision.category(),
            input_summary: input.summary(),
            reason: decision.reason().to_string(),
            session_id: input.session_id.clone(),
        }
    }

    /// Entry for input that could not be parsed
    pub fn for_parse_error(hook: HookKind, error: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook,
            level: if hook == HookKind::Safety {
                LogLevel::Blocked
            } else {
                LogLevel::Error
            },
            tool: String::new(),
            rule_id: Some(PARSE_ERROR_RULE.to_string()),
            category: None,
            input_summary: String::new(),
            reason: error.to_string(),
            session_id: None,
        }
    }

    /// Entry for a notification outcome
    pub fn for_notification(event: &NotificationEvent, outcome: &Outcome) -> Self {
        let (level, input_summary, reason) = match outcome {
            Outcome::Suppressed(reason) => (LogLevel::Suppressed, String::new(), reason.clone()),
            Outcome::Sent(n) => (
                LogLevel::Notified,
                format!("{}: {}", n.title, n.body),
                "delivered".to_string(),
            ),
            Outcome::Failed(n, e) => (
                LogLevel::Error,
                format!("{}: {}", n.title, n.body),
                e.to_string(),
            ),
        };

        Self {
            timestamp: Utc::now(),
            hook: HookKind::Notify,
            level,
            tool: event.kind.to_string(),
            rule_id: None,
            category: None,
            input_summary: redact_secrets(&input_summary),
            reason,
            session_id: event.session_id.clone(),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Open the log for appending; an unopenable path disables logging
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(api[_-]?key|secret[_-]?key|access[_-]?token)\s*[=:]\s*['\x22]?[a-zA-Z0-9_]{16,}",
        r"AKIA[0-9A-Z]{16}",
        r"gh[pousr]_[A-Za-z0-9_]{36,}",
        r"github_pat_[A-Za-z0-9_]{22,}",
        r"sk-ant-[A-Za-z0-9_-]{20,}",
        r"(?i)(authorization:\s*bearer\s+)[A-Za-z0-9._~+/=-]{16,}",
        r"(?i)(password|passwd|pwd)\s*[=:]\s*['\x22][^'\x22]+['\x22]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Redact secrets in text for logging
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, "[REDACTED]").into_owned();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use tempfile::NamedTempFile;

    fn test_input() -> HookInput {
        HookInput::from_json(
            r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"},"session_id":"test-session"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_audit_entry_levels() {
        let input = test_input();
        let allow = AuditEntry::for_decision(&input, &Decision::allow("ok"), false);
        assert_eq!(allow.level, LogLevel::Allowed);
        assert!(allow.rule_id.is_none());

        let ask = Decision::ask("rm-root", Category::Deletion, "gone");
        let entry = AuditEntry::for_decision(&input, &ask, false);
        assert_eq!(entry.level, LogLevel::Asked);
        assert_eq!(entry.category, Some(Category::Deletion));

        let disabled = AuditEntry::for_decision(&input, &Decision::allow("off"), true);
        assert_eq!(disabled.level, LogLevel::Disabled);
    }

    #[test]
    fn test_audit_logger_write() {
        let temp = NamedTempFile::new().unwrap();
        let mut logger = AuditLogger::new(Some(temp.path()));
        assert!(logger.is_enabled());

        let decision = Decision::ask("rm-root", Category::Deletion, "gone");
        logger
            .log(&AuditEntry::for_decision(&test_input(), &decision, false))
            .unwrap();

        let content = std::fs::read_to_string(temp.path()).unwrap();
        let line: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(line["hook"], "safety");
        assert_eq!(line["level"], "ASKED");
        assert_eq!(line["rule_id"], "rm-root");
        assert_eq!(line["category"], "deletion");
        assert_eq!(line["session_id"], "test-session");
    }

    #[test]
    fn test_audit_logger_disabled() {
        let mut logger = AuditLogger::default();
        assert!(!logger.is_enabled());
        let entry = AuditEntry::for_parse_error(HookKind::Notify, "bad json");
        logger.log(&entry).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_audit_write_failure_reported() {
        let mut logger = AuditLogger::new(Some(Path::new("/dev/full")));
        assert!(logger.is_enabled());
        let entry = AuditEntry::for_parse_error(HookKind::Notify, "bad json");
        assert!(logger.log(&entry).is_err());
    }

    #[test]
    fn test_notification_entry() {
        let event = NotificationEvent::from_input(
            crate::input::NotificationInput::from_json(r#"{"hook_event_name":"Stop"}"#).unwrap(),
        );
        let outcome = Outcome::Sent(Notification {
            title: "app".to_string(),
            body: "done".to_string(),
        });
        let entry = AuditEntry::for_notification(&event, &outcome);
        assert_eq!(entry.level, LogLevel::Notified);
        assert_eq!(entry.tool, "Stop");
        assert_eq!(entry.input_summary, "app: done");
    }

    #[test]
    fn test_redact_secrets() {
        let redacted = redact_secrets("curl -H 'x' -d API_KEY=sk_live_abc123def456789012345 http://x");
        assert!(!redacted.contains("sk_live"));
        assert!(redacted.contains("[REDACTED]"));
        assert_eq!(redact_secrets("git status"), "git status");
    }
}
