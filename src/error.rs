//! Error types shared by both hooks

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("invalid hook input: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no hook input on stdin")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("rule {rule} has an invalid pattern: {source}")]
    InvalidPattern {
        rule: &'static str,
        source: regex::Error,
    },

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("desktop notifications are not supported on {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, HookError>;
