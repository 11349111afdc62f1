//! Collection command implementation (feature and master modes).
//!
//! The feature pass:
//! 1. Snapshots the config into the working directory
//! 2. Runs the tool's collector
//! 3. Persists the result bundle
//!
//! The master pass skips step 1 and reuses the snapshot.

use super::models::{CollectionSummary, Settings};
use crate::collector::CollectorRegistry;
use crate::config::{snapshot_config, snapshot_path, TrapdoorConfig};
use crate::model::BranchLabel;
use crate::store::RunStore;
use crate::utils::error::ConfigError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Run one collection pass for `branch` and persist the result
///
/// **Public** - main entry point for the feature and master modes
///
/// Nothing is written to the store unless collection succeeds.
///
/// # Errors
/// * Config snapshot missing, unreadable or without a section for the tool
/// * Analyzer failure, timeout or unparseable output
/// * State write failures
pub fn execute_collect(
    settings: &Settings,
    branch: BranchLabel,
    registry: &CollectorRegistry,
) -> Result<CollectionSummary> {
    let start_time = Instant::now();

    info!("Collecting {} results for {}", branch, settings.tool);
    let store = RunStore::open(&settings.workdir)?;

    if branch == BranchLabel::Feature {
        info!("Step 1/3: Snapshotting config...");
        snapshot_config(&settings.config_source, store.workdir())
            .context("Failed to prepare the config snapshot")?;
    } else {
        debug!("Skipping config snapshot, reusing the feature run's copy");
    }

    info!("Step 2/3: Running analyzer...");
    let config = load_snapshot(&store, branch)?;
    let mut tool_config = config.tool(&settings.tool)?;
    if let Some(timeout) = settings.timeout {
        tool_config.timeout_secs = Some(timeout.as_secs());
    }

    let collector = registry.get(&tool_config.adapter)?;
    debug!("Using '{}' adapter", collector.name());

    let bundle = collector
        .collect(&tool_config)
        .with_context(|| format!("Collection failed for {} on {}", settings.tool, branch))?;

    info!("Step 3/3: Persisting results...");
    let state_path = store.save(&settings.tool, branch, &bundle)?;

    let summary = CollectionSummary {
        tool: settings.tool.clone(),
        branch,
        message_count: bundle.messages().len(),
        counter_total: bundle.counter().total(),
        wall_time: start_time.elapsed(),
        state_path,
    };
    print_summary(&summary);

    Ok(summary)
}

fn load_snapshot(store: &RunStore, branch: BranchLabel) -> Result<TrapdoorConfig> {
    let path = snapshot_path(store.workdir());
    match TrapdoorConfig::load(&path) {
        Ok(config) => Ok(config),
        Err(err @ ConfigError::Missing(_)) if branch == BranchLabel::Master => {
            Err(err).context("No config snapshot; run `trapdoor feature` first")
        }
        Err(err) => Err(err.into()),
    }
}

fn print_summary(summary: &CollectionSummary) {
    println!("TOOL               : {}", summary.tool);
    println!("BRANCH             : {}", summary.branch);
    println!("NUMBER OF MESSAGES : {}", summary.message_count);
    println!("SUM OF COUNTERS    : {}", summary.counter_total);
    println!("WALL TIME          : {:.1}s", summary.wall_time.as_secs_f64());
}
