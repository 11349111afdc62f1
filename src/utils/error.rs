//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading, snapshotting or interpreting the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Cannot read config file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No section for tool '{0}' under \"tools\" in the config")]
    UnknownTool(String),

    #[error("Unknown adapter '{0}' (available: {1})")]
    UnknownAdapter(String, String),

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern '{0}' has no named group 'code'")]
    MissingCodeGroup(String),

    #[error("Empty analyzer command for tool '{0}'")]
    EmptyCommand(String),
}

/// Errors raised while running the external analyzer or parsing its output
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Failed to start analyzer '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Analyzer '{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Analyzer '{command}' did not finish within {}s", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },

    #[error("Unparseable analyzer output at line {line_no}: {line}")]
    Unparseable { line_no: usize, line: String },

    #[error("Count {count} for '{key}' exceeds the limit of {}", crate::utils::config::MAX_COUNT)]
    CountOutOfRange { key: String, count: u64 },

    #[error("Analyzer output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Analyzer output is not valid UTF-8")]
    InvalidUtf8,

    #[error("IO error while collecting analyzer output: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the run-state store
#[derive(Error, Debug)]
pub enum StateError {
    #[error(
        "No persisted {branch} results for tool '{tool}' (expected {}); run `trapdoor {branch}` first",
        path.display()
    )]
    NotFound {
        tool: String,
        branch: String,
        path: PathBuf,
    },

    #[error("Corrupt persisted state {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Persisted state {} has schema version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Persisted state {} belongs to {found}, expected {expected}", path.display())]
    KeyMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StateError {
    /// Branch label named by a `NotFound` error
    pub fn missing_branch(&self) -> Option<&str> {
        match self {
            StateError::NotFound { branch, .. } => Some(branch),
            _ => None,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Rejected tool identifier
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid tool name '{0}': use letters, digits, '.', '_' or '-' and do not start with '.'")]
pub struct InvalidToolName(pub String);
