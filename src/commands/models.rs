use crate::model::{BranchLabel, ToolName};
use crate::utils::config::{DEFAULT_CONFIG_SOURCE, DEFAULT_WORKDIR};
use std::path::PathBuf;
use std::time::Duration;

/// Settings resolved once at the entry point and shared by every mode
///
/// **Public** - used by main.rs to construct from CLI args and environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Wrapped analyzer; keys persisted state and selects the config section
    pub tool: ToolName,

    /// Where persisted runs and the config snapshot live
    pub workdir: PathBuf,

    /// Config copied into the working directory by the feature run
    pub config_source: PathBuf,

    /// Overrides the per-tool analyzer timeout, in whole seconds
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn new(tool: ToolName) -> Self {
        Self {
            tool,
            workdir: PathBuf::from(DEFAULT_WORKDIR),
            config_source: PathBuf::from(DEFAULT_CONFIG_SOURCE),
            timeout: None,
        }
    }
}

/// Arguments for the report command
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Also list resolved and unchanged problems
    pub noisy: bool,

    /// Path to write the JSON report
    pub output: Option<PathBuf>,
}

/// What one collection pass produced
#[derive(Debug, Clone)]
pub struct CollectionSummary {
    pub tool: ToolName,
    pub branch: BranchLabel,
    pub message_count: usize,
    pub counter_total: u64,
    pub wall_time: Duration,
    pub state_path: PathBuf,
}
