//! Dangerous command rules for Bash operations
//!
//! Ordered by priority: when several rules match one command, the earliest
//! entry is the one reported.

use crate::rules::{Category, DangerRule, Pattern};

/// Substrings that mark a path or argument as sensitive
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    ".ssh",
    ".gnupg",
    ".aws",
    ".env",
    "credentials",
    "secrets",
    "private",
    "id_rsa",
    "id_ed25519",
    ".netrc",
    ".npmrc",
    "token",
    "api_key",
    "apikey",
    "password",
];

/// Shell startup files
pub const SHELL_PROFILES: &[&str] = &[".bashrc", ".bash_profile", ".zshrc", ".profile", ".zprofile"];

pub const DANGER_RULES: &[DangerRule] = &[
    // Remote code execution
    DangerRule::new(
        "rce-pipe-to-shell",
        Category::Rce,
        Pattern::lower(r"\b(curl|wget)\s+.*\|\s*(bash|sh|zsh|python|python3|perl|ruby)\b"),
        "Piping download to shell (potential RCE)",
    ),
    DangerRule::new(
        "rce-process-substitution",
        Category::Rce,
        Pattern::lower(r"\b(bash|sh|zsh|source)\s+<\s*\(\s*(curl|wget)\b"),
        "Process substitution with download (potential RCE)",
    ),
    DangerRule::new(
        "rce-eval-download",
        Category::Rce,
        Pattern::lower(r"\beval\s+.*\$\(.*\b(curl|wget)\b"),
        "Eval with download (potential RCE)",
    ),
    DangerRule::new(
        "rce-shell-c-download",
        Category::Rce,
        Pattern::lower(r"\b(bash|sh|zsh)\s+-c\s+.*\$\(.*\b(curl|wget)\b"),
        "Shell -c with download (potential RCE)",
    ),
    DangerRule::new(
        "rce-source-download",
        Category::Rce,
        Pattern::lower(r"\bsource\s+.*\$\(.*\b(curl|wget)\b"),
        "Source with download (potential RCE)",
    ),
    // Catastrophic deletion
    DangerRule::new(
        "rm-root",
        Category::Deletion,
        Pattern::normalised(r"\brm\s+(-{1,2}[A-Za-z-]*\s+)*/\*?(\s|$|[;&|)])"),
        "Catastrophic deletion (rm -rf on root or home)",
    ),
    DangerRule::new(
        "rm-home",
        Category::Deletion,
        Pattern::normalised(r"\brm\s+(-{1,2}[A-Za-z-]*\s+)*(~|\$HOME|\$\{HOME\})/?\*?(\s|$|[;&|)])"),
        "Catastrophic deletion (rm -rf on root or home)",
    ),
    DangerRule::new(
        "find-delete-root",
        Category::Deletion,
        Pattern::normalised(r"\bfind\s+(/|~|\$HOME)\s+.*-delete\b"),
        "Catastrophic deletion (find -delete on root or home)",
    ),
    // Exfiltration
    DangerRule::new(
        "exfil-network-upload",
        Category::Exfiltration,
        Pattern::lower(r"\b(curl|wget|scp|rsync)\b"),
        "Network command with sensitive path '{keyword}'",
    )
    .with_keywords(SENSITIVE_KEYWORDS)
    .requiring(Pattern::raw(r"(-d\b|--data|-F\b|--form|@)")),
    DangerRule::new(
        "exfil-netcat-sensitive",
        Category::Exfiltration,
        Pattern::lower(r"\b(nc|netcat)\b"),
        "Netcat with sensitive path '{keyword}' (potential exfiltration)",
    )
    .with_keywords(SENSITIVE_KEYWORDS),
    DangerRule::new(
        "exfil-pipe-to-netcat",
        Category::Exfiltration,
        Pattern::lower(r"\|.*\b(nc|netcat)\b\s+\S+\s+\d+"),
        "Piping data to netcat (potential exfiltration)",
    ),
    // Persistence
    DangerRule::new(
        "persist-authorized-keys",
        Category::Persistence,
        Pattern::lower(r"authorized_keys"),
        "Modification of SSH authorized_keys (persistence mechanism)",
    )
    .requiring(Pattern::raw(r"(>|\btee\b)")),
    DangerRule::new(
        "persist-crontab",
        Category::Persistence,
        Pattern::lower(r"\bcrontab\s+(-u\s+\S+\s+)?(-[a-z]*e\b|-(\s|$))"),
        "Crontab modification (persistence mechanism)",
    ),
    DangerRule::new(
        "persist-launchctl",
        Category::Persistence,
        Pattern::lower(r"\blaunchctl\s+(load|submit|bootstrap)\b"),
        "Launchctl load/submit (persistence mechanism)",
    ),
    DangerRule::new(
        "persist-shell-profile",
        Category::Persistence,
        Pattern::lower(r"\.(bashrc|bash_profile|zshrc|profile|zprofile)\b"),
        "Modification of shell profile '{keyword}' (persistence mechanism)",
    )
    .with_keywords(SHELL_PROFILES)
    .requiring(Pattern::raw(r"(>|\btee\b|\bsed\s+-i|\bnano\b|\bvim?\b)")),
    // Privilege escalation
    DangerRule::new(
        "privesc-chmod-setuid",
        Category::PrivilegeEscalation,
        Pattern::raw(r"\bchmod\s+(-\S+\s+)*[ugoa]*\+[rwxXt]*[sS]"),
        "chmod +s (setuid - privilege escalation)",
    ),
    DangerRule::new(
        "privesc-chmod-octal",
        Category::PrivilegeEscalation,
        Pattern::raw(r"\bchmod\s+(-\S+\s+)*0?[2-7][0-7]{3}\b"),
        "chmod with setuid/setgid bit (privilege escalation)",
    ),
    // System file modification
    DangerRule::new(
        "sysmod-redirect-etc",
        Category::SystemModification,
        Pattern::raw(r">\s*/etc/"),
        "Redirect to /etc/ (system file modification)",
    ),
    DangerRule::new(
        "sysmod-tee-etc",
        Category::SystemModification,
        Pattern::raw(r"\btee\s+(-\S+\s+)*/etc/"),
        "tee to /etc/ (system file modification)",
    ),
];

/// Look up a rule by id
pub fn rule(id: &str) -> Option<&'static DangerRule> {
    DANGER_RULES.iter().find(|r| r.id == id)
}
