//! Desktop notifications for assistant prompts and stops
//!
//! Turns a Notification/Stop hook payload into a title and body and hands
//! it to a [`NotificationSink`]. Delivery failures are reported to the
//! caller, never raised.

pub mod sink;
pub mod transcript;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::NotifyConfig;
use crate::error::HookError;
use crate::input::NotificationInput;

pub use sink::{NotificationSink, OsNotifier};

const DEFAULT_TITLE: &str = "Claude Code";

/// Kind of event that triggered the hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Notification,
    Stop,
    IdlePrompt,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Notification => "Notification",
            EventKind::Stop => "Stop",
            EventKind::IdlePrompt => "idle_prompt",
            EventKind::Other(name) => name,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification-worthy event
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub kind: EventKind,
    pub project_path: Option<PathBuf>,
    pub question: Option<String>,
    pub transcript_path: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl NotificationEvent {
    pub fn from_input(input: NotificationInput) -> Self {
        let kind = match (input.notification_type.as_deref(), input.hook_event_name.as_deref()) {
            (Some("idle_prompt"), _) => EventKind::IdlePrompt,
            (_, Some("Notification") | None) => EventKind::Notification,
            (_, Some("Stop")) => EventKind::Stop,
            (_, Some(other)) => EventKind::Other(other.to_string()),
        };

        Self {
            kind,
            project_path: input.cwd.filter(|c| !c.is_empty()).map(PathBuf::from),
            question: input.message.filter(|m| !m.trim().is_empty()),
            transcript_path: input.transcript_path.map(PathBuf::from),
            session_id: input.session_id,
        }
    }

    /// Directory name of the project, if known
    pub fn project_name(&self) -> Option<String> {
        self.project_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// A composed notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Result of handling one event
#[derive(Debug)]
pub enum Outcome {
    /// Nothing sent, with the reason
    Suppressed(String),
    Sent(Notification),
    Failed(Notification, HookError),
}

/// Whether `kind` produces no notification. idle_prompt never does.
pub fn is_suppressed(kind: &EventKind, config: &NotifyConfig) -> bool {
    matches!(kind, EventKind::IdlePrompt) || config.suppress.iter().any(|s| s == kind.as_str())
}

/// Build the notification for an event, or None if it is suppressed
pub fn compose(event: &NotificationEvent, config: &NotifyConfig) -> Option<Notification> {
    if !config.enabled || is_suppressed(&event.kind, config) {
        return None;
    }

    let title = event
        .project_name()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let body = match &event.question {
        Some(question) => question.clone(),
        None => event
            .transcript_path
            .as_deref()
            .and_then(transcript::last_assistant_text)
            .map(|text| transcript::truncate(&text, config.max_body_chars))
            .unwrap_or_else(|| fallback_body(&event.kind).to_string()),
    };

    Some(Notification { title, body })
}

fn fallback_body(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Stop => "Claude has finished responding",
        _ => "Claude needs your attention",
    }
}

/// Compose and deliver a notification for `event`
pub fn run(event: &NotificationEvent, config: &NotifyConfig, sink: &dyn NotificationSink) -> Outcome {
    let Some(notification) = compose(event, config) else {
        let reason = if config.enabled {
            format!("{} is suppressed", event.kind)
        } else {
            "notifications disabled".to_string()
        };
        return Outcome::Suppressed(reason);
    };

    match sink.send(&notification) {
        Ok(()) => Outcome::Sent(notification),
        Err(e) => Outcome::Failed(notification, e),
    }
}
