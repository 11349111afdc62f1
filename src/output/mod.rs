//! Output writers for regression reports.
//!
//! This module handles presenting a report:
//! - Plain-text rendering for the terminal / CI log
//! - JSON report artifacts

pub mod json;
pub mod terminal;

// Re-export main functions
pub use json::{read_report, write_report, ReportDocument};
pub use terminal::render_report;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
