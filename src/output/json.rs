//! JSON report writer.
//!
//! Writes the regression report as a CI artifact next to the text output.

use super::validate_path;
use crate::diff::{RegressionReport, Verdict};
use crate::model::ToolName;
use crate::utils::error::OutputError;
use crate::utils::fs::write_atomic;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Top-level structure of the JSON report artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub tool: ToolName,

    /// When the feature results were collected
    pub feature_collected_at: DateTime<Utc>,

    /// When the master results were collected
    pub master_collected_at: DateTime<Utc>,

    pub verdict: Verdict,

    pub report: RegressionReport,
}

/// Write a report document to a JSON file
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path or a directory
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_report(
    document: &ReportDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());
    validate_path(output_path)?;

    let json = serde_json::to_vec_pretty(document)?;
    write_atomic(output_path, &json)?;

    Ok(())
}

/// Read a report document back from a JSON file
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ReportDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let document: ReportDocument = serde_json::from_reader(file)?;

    Ok(document)
}
