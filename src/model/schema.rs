//! Result and persisted-run schema definitions.
//!
//! `PersistedRun` is the structure written to the working directory.
//! Schema is versioned so report mode can reject records it cannot read.

use super::counter::{Counter, MessageSet};
use crate::utils::error::InvalidToolName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the wrapped analyzer, e.g. `pycodestyle`
///
/// Becomes part of a file name, so only `[A-Za-z0-9_.-]` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidToolName> {
        let name = name.into();
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if valid {
            Ok(Self(name))
        } else {
            Err(InvalidToolName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ToolName {
    type Error = InvalidToolName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ToolName::new(value)
    }
}

impl From<ToolName> for String {
    fn from(value: ToolName) -> Self {
        value.0
    }
}

impl FromStr for ToolName {
    type Err = InvalidToolName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::new(s)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the comparison a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchLabel {
    /// The proposed change under test
    Feature,
    /// The baseline
    Master,
}

impl BranchLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchLabel::Feature => "feature",
            BranchLabel::Master => "master",
        }
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized output of one collection pass
///
/// Immutable once built: there is no mutable access to either part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBundle {
    counter: Counter,
    messages: MessageSet,
}

impl ResultBundle {
    pub fn new(counter: Counter, messages: MessageSet) -> Self {
        Self { counter, messages }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn messages(&self) -> &MessageSet {
        &self.messages
    }
}

/// A result bundle as stored under (tool, branch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRun {
    /// Schema version for compatibility checking
    pub schema_version: u32,

    pub tool: ToolName,

    pub branch: BranchLabel,

    /// When the collection pass finished
    pub collected_at: DateTime<Utc>,

    pub bundle: ResultBundle,
}
