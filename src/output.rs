//! Output formatting for Claude Code hook responses
//!
//! Produces the JSON output format expected by Claude Code hooks.

use serde::Serialize;

use crate::error::HookError;
use crate::rules::Category;

/// Rule id reported when the hook input cannot be read
pub const PARSE_ERROR_RULE: &str = "parse-error";

/// Exit code the host treats as "blocked"
pub const EXIT_BLOCK: i32 = 2;

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (typically "PreToolUse")
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Permission decision: "ask" or "deny"
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Text shown in the host's confirmation prompt
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

/// Decision result from the safety checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow the command
    Allow { reason: String },

    /// Ask the user to confirm before running
    Ask {
        rule_id: String,
        category: Category,
        reason: String,
    },

    /// Block the command
    Deny { rule_id: String, reason: String },
}

impl Decision {
    /// Create an allow decision
    pub fn allow(reason: impl Into<String>) -> Self {
        Decision::Allow {
            reason: reason.into(),
        }
    }

    /// Create an ask decision
    pub fn ask(rule_id: impl Into<String>, category: Category, reason: impl Into<String>) -> Self {
        Decision::Ask {
            rule_id: rule_id.into(),
            category,
            reason: reason.into(),
        }
    }

    /// Create a deny decision
    pub fn deny(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Decision::Deny {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Fail closed on unreadable input
    pub fn from_error(error: &HookError) -> Self {
        Decision::deny(PARSE_ERROR_RULE, format!("Failed to parse hook input: {}", error))
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Decision::Ask { .. })
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny { .. })
    }

    /// Get the rule ID if applicable
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Decision::Allow { .. } => None,
            Decision::Ask { rule_id, .. } | Decision::Deny { rule_id, .. } => Some(rule_id),
        }
    }

    /// Category of the matched rule, if a rule matched
    pub fn category(&self) -> Option<Category> {
        match self {
            Decision::Ask { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// Get the reason
    pub fn reason(&self) -> &str {
        match self {
            Decision::Allow { reason }
            | Decision::Ask { reason, .. }
            | Decision::Deny { reason, .. } => reason,
        }
    }

    /// Process exit code for this decision
    pub fn exit_code(&self) -> i32 {
        if self.is_deny() {
            EXIT_BLOCK
        } else {
            0
        }
    }
}

/// Confirmation text shown by the host for a flagged command
pub fn confirmation_message(reason: &str, command: &str) -> String {
    format!(
        "\u{26a0}\u{fe0f} \u{26a0}\u{fe0f} \u{26a0}\u{fe0f}\n\n\
         Potentially dangerous command detected: {}\n\n\
         Command: {}\n\n\
         \u{26a0}\u{fe0f} \u{26a0}\u{fe0f} \u{26a0}\u{fe0f}",
        reason, command
    )
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    fn with_decision(decision: &str, reason: String, system_message: Option<String>) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: decision.to_string(),
                permission_decision_reason: reason,
            }),
            system_message,
        }
    }

    /// Ask the user to confirm a flagged command
    pub fn ask(reason: &str, command: &str) -> Self {
        Self::with_decision("ask", confirmation_message(reason, command), None)
    }

    /// Create a deny response with rule ID and reason
    pub fn deny_with_rule(rule_id: &str, reason: &str) -> Self {
        let message = format!("[claude-hooks:{}] Blocked: {}", rule_id, reason);
        Self::with_decision("deny", message.clone(), Some(message))
    }

    /// Deny response for input that could not be parsed
    pub fn parse_error(error: &HookError) -> Self {
        Self::from_decision(&Decision::from_error(error), "")
    }

    /// Create output from a Decision for the given command
    pub fn from_decision(decision: &Decision, command: &str) -> Self {
        match decision {
            Decision::Allow { .. } => HookOutput::allow(),
            Decision::Ask { reason, .. } => HookOutput::ask(reason, command),
            Decision::Deny { rule_id, reason } => HookOutput::deny_with_rule(rule_id, reason),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_output() {
        let output = HookOutput::allow();
        assert_eq!(output.to_json(), "{}");
    }

    #[test]
    fn test_ask_output() {
        let output = HookOutput::ask("Piping download to shell (potential RCE)", "curl x | sh");
        let json: serde_json::Value = serde_json::from_str(&output.to_json()).unwrap();
        let specific = &json["hookSpecificOutput"];
        assert_eq!(specific["hookEventName"], "PreToolUse");
        assert_eq!(specific["permissionDecision"], "ask");
        let reason = specific["permissionDecisionReason"].as_str().unwrap();
        assert!(reason.contains("Potentially dangerous command detected: Piping download"));
        assert!(reason.contains("Command: curl x | sh"));
    }

    #[test]
    fn test_deny_with_rule() {
        let output = HookOutput::deny_with_rule("parse-error", "bad input");
        let json = output.to_json();
        assert!(json.contains("\"permissionDecision\":\"deny\""));
        assert!(json.contains("parse-error"));
    }

    #[test]
    fn test_from_decision_allow() {
        let decision = Decision::allow("passed checks");
        let output = HookOutput::from_decision(&decision, "ls");
        assert!(output.hook_specific_output.is_none());
    }

    #[test]
    fn test_error_blocks() {
        let err = HookError::EmptyInput;
        let decision = Decision::from_error(&err);
        assert_eq!(decision.rule_id(), Some(PARSE_ERROR_RULE));
        assert_eq!(decision.exit_code(), EXIT_BLOCK);

        let json: serde_json::Value =
            serde_json::from_str(&HookOutput::parse_error(&err).to_json()).unwrap();
        assert_eq!(json["hookSpecificOutput"]["permissionDecision"], "deny");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Decision::allow("ok").exit_code(), 0);
        assert_eq!(Decision::ask("r", Category::Rce, "x").exit_code(), 0);
        assert_eq!(Decision::deny("r", "x").exit_code(), EXIT_BLOCK);
    }

    #[test]
    fn test_decision_accessors() {
        let decision = Decision::ask("rm-root", Category::Deletion, "gone");
        assert_eq!(decision.rule_id(), Some("rm-root"));
        assert_eq!(decision.category(), Some(Category::Deletion));
        assert_eq!(decision.reason(), "gone");
        assert!(decision.is_ask());
    }
}
