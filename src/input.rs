//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON input from stdin that Claude Code sends to hooks.

use serde::de::Error as _;
use serde::Deserialize;

use crate::audit::redact_secrets;
use crate::error::HookError;

/// PreToolUse input from Claude Code
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Edit", "Write")
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: Option<ToolInput>,

    /// Flat form: command given next to tool_name instead of inside tool_input
    #[serde(default)]
    pub command: Option<String>,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Tool-specific input
#[derive(Debug, Clone)]
pub enum ToolInput {
    /// Shell command execution
    Command {
        command: String,
        #[allow(dead_code)]
        description: Option<String>,
    },

    /// Anything without a command - passed through untouched
    Other { raw: serde_json::Value },
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(obj) = value.as_object() {
            match obj.get("command") {
                Some(serde_json::Value::String(command)) => {
                    return Ok(ToolInput::Command {
                        command: command.clone(),
                        description: obj
                            .get("description")
                            .and_then(|v| v.as_str())
                            .map(String::from),
                    });
                }
                // A command that is not a string cannot be checked
                Some(serde_json::Value::Null) | None => {}
                Some(_) => return Err(D::Error::custom("tool_input.command must be a string")),
            }
        }

        Ok(ToolInput::Other { raw: value })
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The command to check; empty when none was supplied
    pub fn command(&self) -> &str {
        match &self.tool_input {
            Some(ToolInput::Command { command, .. }) => command,
            _ => self.command.as_deref().unwrap_or(""),
        }
    }

    /// Parse raw stdin text; blank input is an error
    pub fn parse(text: &str) -> Result<Self, HookError> {
        if text.trim().is_empty() {
            return Err(HookError::EmptyInput);
        }
        Ok(Self::from_json(text)?)
    }

    /// Get a summary of the input for logging, secrets redacted
    pub fn summary(&self) -> String {
        if self.command().is_empty() {
            return format!("{}: <no command>", self.tool_name);
        }
        // Redact before cutting so a token split at the limit is still caught
        let command = redact_secrets(self.command());
        let truncated = if command.chars().count() > 100 {
            let head: String = command.chars().take(100).collect();
            format!("{}...", head)
        } else {
            command
        };
        format!("{}: {}", self.tool_name, truncated)
    }
}

/// Notification / Stop input from Claude Code
#[derive(Debug, Default, Deserialize)]
pub struct NotificationInput {
    /// "Notification", "Stop", "SubagentStop", ...
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Sub-kind of a Notification event (e.g. "idle_prompt", "permission_prompt")
    #[serde(default)]
    pub notification_type: Option<String>,

    /// Question or prompt text shown to the user
    #[serde(default, alias = "question")]
    pub message: Option<String>,

    /// Project working directory
    #[serde(default)]
    pub cwd: Option<String>,

    /// JSONL transcript of the session
    #[serde(default)]
    pub transcript_path: Option<String>,

    #[serde(default)]
    pub session_id: Option<String>,
}

impl NotificationInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
