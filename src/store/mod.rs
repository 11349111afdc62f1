//! Run-state store.
//!
//! Persists one result bundle per (tool, branch) in the working directory so
//! the feature, master and report invocations can hand results to each other.
//! Records are pretty JSON with an explicit schema version, written with
//! temp-file-then-rename so a crash never leaves a half-written record.

use crate::model::{BranchLabel, PersistedRun, ResultBundle, ToolName};
use crate::utils::config::{RESULTS_FILE_PREFIX, SCHEMA_VERSION};
use crate::utils::error::StateError;
use crate::utils::fs::{ensure_dir, write_atomic};
use chrono::Utc;
use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Handle on the working directory holding persisted runs
#[derive(Debug, Clone)]
pub struct RunStore {
    workdir: PathBuf,
}

impl RunStore {
    /// Open the store, creating the working directory on first use
    pub fn open(workdir: impl Into<PathBuf>) -> Result<Self, StateError> {
        let workdir = workdir.into();
        ensure_dir(&workdir).map_err(|source| StateError::Io {
            path: workdir.clone(),
            source,
        })?;
        Ok(Self { workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Deterministic record location for (tool, branch)
    pub fn path_for(&self, tool: &ToolName, branch: BranchLabel) -> PathBuf {
        self.workdir
            .join(format!("{}_{}_{}.json", RESULTS_FILE_PREFIX, tool, branch))
    }

    /// Persist `bundle` under (tool, branch), replacing any earlier record
    pub fn save(
        &self,
        tool: &ToolName,
        branch: BranchLabel,
        bundle: &ResultBundle,
    ) -> Result<PathBuf, StateError> {
        let run = PersistedRun {
            schema_version: SCHEMA_VERSION,
            tool: tool.clone(),
            branch,
            collected_at: Utc::now(),
            bundle: bundle.clone(),
        };
        self.save_run(&run)
    }

    /// Persist a complete record under its own (tool, branch) key
    pub fn save_run(&self, run: &PersistedRun) -> Result<PathBuf, StateError> {
        let path = self.path_for(&run.tool, run.branch);
        let json = serde_json::to_vec_pretty(run).map_err(|source| StateError::Corrupt {
            path: path.clone(),
            source,
        })?;

        write_atomic(&path, &json).map_err(|source| StateError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Saved {} results for {} to {}",
            run.branch,
            run.tool,
            path.display()
        );
        Ok(path)
    }

    /// Load the bundle stored under (tool, branch)
    ///
    /// # Errors
    /// * `StateError::NotFound` - nothing was saved for this key
    /// * `StateError::Corrupt` - the record is not valid JSON or not a run record
    /// * `StateError::UnsupportedVersion` - written by an incompatible version
    /// * `StateError::KeyMismatch` - the record belongs to another tool or branch
    pub fn load(&self, tool: &ToolName, branch: BranchLabel) -> Result<ResultBundle, StateError> {
        self.load_run(tool, branch).map(|run| run.bundle)
    }

    /// Load the full record stored under (tool, branch)
    pub fn load_run(
        &self,
        tool: &ToolName,
        branch: BranchLabel,
    ) -> Result<PersistedRun, StateError> {
        let path = self.path_for(tool, branch);
        debug!("Loading {} results from: {}", branch, path.display());

        if !path.is_file() {
            return Err(StateError::NotFound {
                tool: tool.to_string(),
                branch: branch.to_string(),
                path,
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| StateError::Io {
            path: path.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&contents).map_err(|source| StateError::Corrupt {
            path: path.clone(),
            source,
        })?;

        // Check the version before the shape so format changes are named as such
        if let Some(found) = value.get("schema_version").and_then(Value::as_u64) {
            if found != u64::from(SCHEMA_VERSION) {
                return Err(StateError::UnsupportedVersion {
                    path,
                    found: u32::try_from(found).unwrap_or(u32::MAX),
                    expected: SCHEMA_VERSION,
                });
            }
        }

        let run: PersistedRun =
            serde_json::from_value(value).map_err(|source| StateError::Corrupt {
                path: path.clone(),
                source,
            })?;

        if &run.tool != tool || run.branch != branch {
            return Err(StateError::KeyMismatch {
                path,
                found: format!("{}/{}", run.tool, run.branch),
                expected: format!("{}/{}", tool, branch),
            });
        }

        debug!(
            "Loaded {} messages, {} counter keys (collected {})",
            run.bundle.messages().len(),
            run.bundle.counter().len(),
            run.collected_at.to_rfc3339()
        );
        Ok(run)
    }
}
