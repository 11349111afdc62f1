//! Report command implementation.
//! Loads both persisted runs, compares them and reports the verdict.

use super::models::{ReportArgs, Settings};
use crate::diff::{compare_results, Verdict};
use crate::model::{BranchLabel, ToolName};
use crate::output::{render_report, write_report, ReportDocument};
use crate::store::RunStore;
use anyhow::{Context, Result};
use log::info;

/// Execute the report command
///
/// Prints the rendered report to stdout and returns the verdict; the caller
/// maps it to the process exit status. The JSON artifact is written before
/// anything is printed, so a failed write never follows a printed verdict.
pub fn execute_report(settings: &Settings, args: &ReportArgs) -> Result<Verdict> {
    // Step 1: Load both runs, nothing is printed unless both exist
    let store = RunStore::open(&settings.workdir)?;
    let document = build_report(&store, &settings.tool)?;

    // Step 2: Write JSON artifact if requested
    if let Some(path) = &args.output {
        write_report(&document, path).context("Failed to write report JSON")?;
    }

    // Step 3: Terminal report
    print!("{}", render_report(&document.report, args.noisy));

    info!("Verdict for {}: {}", settings.tool, document.verdict);
    Ok(document.verdict)
}

/// Load the feature and master runs of `tool` and compare them
pub fn build_report(store: &RunStore, tool: &ToolName) -> Result<ReportDocument> {
    let feature = store.load_run(tool, BranchLabel::Feature)?;
    let master = store.load_run(tool, BranchLabel::Master)?;

    let report = compare_results(&feature.bundle, &master.bundle);

    Ok(ReportDocument {
        tool: tool.clone(),
        feature_collected_at: feature.collected_at,
        master_collected_at: master.collected_at,
        verdict: report.verdict(),
        report,
    })
}
