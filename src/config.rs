//! Configuration loading for claude-hooks
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{HookError, Result};

/// What the safety hook does when a danger rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnMatch {
    /// Ask the user to confirm (the host shows its permission prompt)
    #[default]
    Ask,

    /// Block outright
    Deny,
}

impl OnMatch {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ask" => Some(OnMatch::Ask),
            "deny" => Some(OnMatch::Deny),
            _ => None,
        }
    }

    /// Parse a command-line value, with a warning for anything unrecognised
    pub fn from_arg(s: &str) -> std::result::Result<Self, String> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "unknown --on-match value '{}' (expected ask or deny), using config",
                s
            )
        })
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/hooks/audit.jsonl".to_string()),
        }
    }
}

/// Safety hook configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Run the danger rules at all
    pub enabled: bool,

    /// Decision to emit when a rule matches
    pub on_match: OnMatch,

    /// Rule ids to skip
    pub disabled_rules: Vec<String>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            on_match: OnMatch::Ask,
            disabled_rules: Vec::new(),
        }
    }
}

/// Notification hook configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Send notifications at all
    pub enabled: bool,

    /// Event kinds that never produce a notification
    pub suppress: Vec<String>,

    /// Maximum body length in characters
    pub max_body_chars: usize,

    /// Sound name passed to the notification facility (macOS only)
    pub sound: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suppress: vec!["idle_prompt".to_string()],
            max_body_chars: 200,
            sound: Some("Glass".to_string()),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub safety: SafetyConfig,
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/hooks/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/claude-hooks/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Warning: {}", e),
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| HookError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if env::var_os("CLAUDE_HOOKS_DISABLED").is_some() {
            self.safety.enabled = false;
        }
        if env::var_os("CLAUDE_HOOKS_NO_NOTIFY").is_some() {
            self.notify.enabled = false;
        }
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), or None when auditing is off
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/hooks/audit.jsonl"

[safety]
enabled = true
on_match = "ask"
disabled_rules = []

[notify]
enabled = true
suppress = ["idle_prompt"]
max_body_chars = 200
sound = "Glass"
"#;
