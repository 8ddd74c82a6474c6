//! Safety engine for claude-hooks
//!
//! Compiles the danger rule table once and evaluates commands against it.

use regex::Regex;

use crate::config::{OnMatch, SafetyConfig};
use crate::error::{HookError, Result};
use crate::input::HookInput;
use crate::output::Decision;
use crate::rules::dangerous::DANGER_RULES;
use crate::rules::{DangerRule, Pattern, View};

/// Only this tool carries shell commands
pub const BASH_TOOL: &str = "Bash";

/// The renderings of one command that patterns run against
pub struct CommandViews<'a> {
    raw: &'a str,
    lower: String,
    normalised: String,
}

impl<'a> CommandViews<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            raw: command,
            lower: command.to_lowercase(),
            normalised: command.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }

    pub fn get(&self, view: View) -> &str {
        match view {
            View::Lower => &self.lower,
            View::Normalised => &self.normalised,
            View::Raw => self.raw,
        }
    }
}

/// A rule with its patterns compiled
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: &'static DangerRule,
    trigger: Regex,
    requires: Option<Regex>,
}

impl CompiledRule {
    pub fn compile(rule: &'static DangerRule) -> Result<Self> {
        let build = |pattern: Pattern| {
            Regex::new(pattern.regex).map_err(|source| HookError::InvalidPattern {
                rule: rule.id,
                source,
            })
        };

        Ok(Self {
            rule,
            trigger: build(rule.trigger)?,
            requires: rule.requires.map(build).transpose()?,
        })
    }

    /// Evaluate against a command; on a match, returns the reason text
    pub fn evaluate(&self, views: &CommandViews<'_>) -> Option<String> {
        if !self.trigger.is_match(views.get(self.rule.trigger.view)) {
            return None;
        }

        let keyword = if self.rule.keywords.is_empty() {
            None
        } else {
            let lower = views.get(View::Lower);
            Some(*self.rule.keywords.iter().find(|k| lower.contains(*k))?)
        };

        if let (Some(re), Some(pattern)) = (&self.requires, self.rule.requires) {
            if !re.is_match(views.get(pattern.view)) {
                return None;
            }
        }

        Some(match keyword {
            Some(keyword) => self.rule.reason.replace("{keyword}", keyword),
            None => self.rule.reason.to_string(),
        })
    }
}

/// The safety checker behind the PreToolUse hook
pub struct SafetyChecker {
    enabled: bool,
    on_match: OnMatch,
    rules: Vec<CompiledRule>,
}

impl SafetyChecker {
    /// Compile the rule table, skipping any rules disabled in config
    pub fn new(config: &SafetyConfig) -> Result<Self> {
        let rules = DANGER_RULES
            .iter()
            .filter(|rule| !config.disabled_rules.iter().any(|id| id == rule.id))
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            enabled: config.enabled,
            on_match: config.on_match,
            rules,
        })
    }

    /// Whether checks are switched off (config or CLAUDE_HOOKS_DISABLED)
    pub fn is_disabled(&self) -> bool {
        !self.enabled
    }

    /// Main entry point: check an input and return a decision
    pub fn check(&self, input: &HookInput) -> Decision {
        if self.is_disabled() {
            return Decision::allow("safety checks disabled");
        }

        if input.tool_name != BASH_TOOL {
            return Decision::allow(format!("{} is not checked", input.tool_name));
        }

        self.check_command(input.command())
    }

    /// Check a bash command
    pub fn check_command(&self, command: &str) -> Decision {
        if command.trim().is_empty() {
            return Decision::allow("empty command");
        }

        let views = CommandViews::new(command);
        for compiled in &self.rules {
            if let Some(reason) = compiled.evaluate(&views) {
                let rule = compiled.rule;
                return match self.on_match {
                    OnMatch::Ask => Decision::ask(rule.id, rule.category, reason),
                    OnMatch::Deny => Decision::deny(rule.id, reason),
                };
            }
        }

        Decision::allow("passed all checks")
    }

    /// First matching rule in priority order
    pub fn first_match(&self, command: &str) -> Option<&CompiledRule> {
        let views = CommandViews::new(command);
        self.rules.iter().find(|r| r.evaluate(&views).is_some())
    }

    /// Every matching rule with its reason, in priority order
    pub fn matches(&self, command: &str) -> Vec<(&CompiledRule, String)> {
        let views = CommandViews::new(command);
        self.rules
            .iter()
            .filter_map(|r| r.evaluate(&views).map(|reason| (r, reason)))
            .collect()
    }

    /// Number of active rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
