//! Trapdoor config file handling.
//!
//! The config is a JSON document. The feature run copies it into the working
//! directory once, and both collection passes read that snapshot so they run
//! under identical settings. Only the `tools.<name>` section is interpreted;
//! every other key is left alone.

use crate::model::ToolName;
use crate::utils::config::{CONFIG_SNAPSHOT_NAME, DEFAULT_ACCEPTED_EXIT_CODES};
use crate::utils::error::ConfigError;
use crate::utils::fs::write_atomic;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Loaded config document
#[derive(Debug, Clone)]
pub struct TrapdoorConfig {
    path: PathBuf,
    raw: Value,
}

/// Settings for one wrapped analyzer, read from `tools.<name>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Registered collector adapter, e.g. `lines` or `json`
    pub adapter: String,

    /// Analyzer argv; the first element is the program
    pub command: Vec<String>,

    /// Directory to run the analyzer in (defaults to the current directory)
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Exit codes that still count as a successful analyzer run
    #[serde(default = "default_accepted_exit_codes")]
    pub accepted_exit_codes: Vec<i32>,

    /// Upper bound on analyzer wall time
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Line pattern for the `lines` adapter
    #[serde(default)]
    pub pattern: Option<String>,

    /// Output lines to skip as noise
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Diagnostics to drop from the result
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_accepted_exit_codes() -> Vec<i32> {
    DEFAULT_ACCEPTED_EXIT_CODES.to_vec()
}

impl ToolConfig {
    /// Minimal config running `command` through `adapter`
    pub fn new(adapter: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            adapter: adapter.into(),
            command,
            cwd: None,
            accepted_exit_codes: default_accepted_exit_codes(),
            timeout_secs: None,
            pattern: None,
            ignore: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl TrapdoorConfig {
    /// Read and parse a config file
    ///
    /// # Errors
    /// * `ConfigError::Missing` - file does not exist
    /// * `ConfigError::Unreadable` - I/O failure
    /// * `ConfigError::Invalid` - not a JSON document
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: Value = serde_json::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            raw,
        })
    }

    /// Typed settings for `tool`
    pub fn tool(&self, tool: &ToolName) -> Result<ToolConfig, ConfigError> {
        let section = self
            .raw
            .get("tools")
            .and_then(|tools| tools.get(tool.as_str()))
            .ok_or_else(|| ConfigError::UnknownTool(tool.to_string()))?;

        let config: ToolConfig =
            serde_json::from_value(section.clone()).map_err(|source| ConfigError::Invalid {
                path: self.path.clone(),
                source,
            })?;

        if config.command.is_empty() {
            return Err(ConfigError::EmptyCommand(tool.to_string()));
        }

        Ok(config)
    }
}

/// Location of the config snapshot inside `workdir`
pub fn snapshot_path(workdir: &Path) -> PathBuf {
    workdir.join(CONFIG_SNAPSHOT_NAME)
}

/// Copy the source config into `workdir`, byte for byte
///
/// The source is parsed first so a broken config fails here rather than
/// halfway through a collection pass.
pub fn snapshot_config(source: &Path, workdir: &Path) -> Result<PathBuf, ConfigError> {
    TrapdoorConfig::load(source)?;

    let bytes = std::fs::read(source).map_err(|e| ConfigError::Unreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let target = snapshot_path(workdir);
    write_atomic(&target, &bytes).map_err(|e| ConfigError::Unreadable {
        path: target.clone(),
        source: e,
    })?;

    info!("Config snapshot: {} -> {}", source.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "project": "demo",
        "tools": {
            "pycodestyle": {
                "adapter": "lines",
                "command": ["pycodestyle", "src"],
                "timeout_secs": 30,
                "exclude": ["E501"]
            },
            "broken": {
                "adapter": "lines",
                "command": []
            }
        }
    }"#;

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("trapdoor.cfg");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_tool_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrapdoorConfig::load(write_sample(dir.path())).unwrap();

        let tool = config.tool(&ToolName::new("pycodestyle").unwrap()).unwrap();

        assert_eq!(tool.adapter, "lines");
        assert_eq!(tool.command, vec!["pycodestyle", "src"]);
        assert_eq!(tool.accepted_exit_codes, vec![0, 1]);
        assert_eq!(tool.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(tool.exclude, vec!["E501"]);
        assert!(tool.ignore.is_empty());
    }

    #[test]
    fn test_unknown_tool() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrapdoorConfig::load(write_sample(dir.path())).unwrap();

        let err = config.tool(&ToolName::new("cppcheck").unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTool(name) if name == "cppcheck"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrapdoorConfig::load(write_sample(dir.path())).unwrap();

        let err = config.tool(&ToolName::new("broken").unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrapdoorConfig::load(dir.path().join("nope.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cfg");
        std::fs::write(&path, "{ not json").unwrap();

        let err = TrapdoorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_snapshot_copies_unmodified() {
        let src_dir = tempfile::tempdir().unwrap();
        let workdir = tempfile::tempdir().unwrap();
        let source = write_sample(src_dir.path());

        let target = snapshot_config(&source, &workdir.path().join("qa")).unwrap();

        assert_eq!(target, workdir.path().join("qa").join("trapdoor.cfg"));
        assert_eq!(std::fs::read_to_string(target).unwrap(), SAMPLE);
    }
}
