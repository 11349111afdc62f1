//! End-to-end tests of the feature -> master -> report sequence through the
//! library API, with canned collectors standing in for real analyzers.

mod common;

use common::{broken_registry, bundle, registry_with, settings};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use trapdoor::collector::CollectorRegistry;
use trapdoor::commands::{build_report, execute_collect, execute_report, ReportArgs, Settings};
use trapdoor::diff::Verdict;
use trapdoor::model::{BranchLabel, ResultBundle};
use trapdoor::output::read_report;
use trapdoor::store::RunStore;
use trapdoor::utils::{CollectionError, ConfigError, StateError};

fn collect_both(
    root: &std::path::Path,
    feature: ResultBundle,
    master: ResultBundle,
) -> trapdoor::commands::Settings {
    let settings = settings(root);
    execute_collect(&settings, BranchLabel::Feature, &registry_with(feature)).unwrap();
    execute_collect(&settings, BranchLabel::Master, &registry_with(master)).unwrap();
    settings
}

#[test]
fn test_new_message_is_regression() {
    let dir = tempfile::tempdir().unwrap();
    let settings = collect_both(
        dir.path(),
        bundle(&[], &["m2", "m3"]),
        bundle(&[], &["m1", "m2"]),
    );

    let store = RunStore::open(&settings.workdir).unwrap();
    let document = build_report(&store, &settings.tool).unwrap();

    assert_eq!(document.report.resolved, vec!["m1"]);
    assert_eq!(document.report.unchanged, vec!["m2"]);
    assert_eq!(document.report.new, vec!["m3"]);
    assert_eq!(document.verdict, Verdict::Regression);
    assert_eq!(
        execute_report(&settings, &ReportArgs::default()).unwrap(),
        Verdict::Regression
    );
}

#[test]
fn test_unchanged_counters_good_enough() {
    let dir = tempfile::tempdir().unwrap();
    let settings = collect_both(
        dir.path(),
        bundle(&[("warnings", 5)], &["w1"]),
        bundle(&[("warnings", 5)], &["w1"]),
    );

    let verdict = execute_report(&settings, &ReportArgs::default()).unwrap();

    assert_eq!(verdict, Verdict::GoodEnough);
}

#[test]
fn test_counter_increase_is_regression() {
    let dir = tempfile::tempdir().unwrap();
    let settings = collect_both(
        dir.path(),
        bundle(&[("errors", 3)], &["same"]),
        bundle(&[("errors", 1)], &["same"]),
    );

    let store = RunStore::open(&settings.workdir).unwrap();
    let document = build_report(&store, &settings.tool).unwrap();

    assert_eq!(
        document.report.new_counter_deltas,
        BTreeMap::from([("errors".to_string(), 2u64)])
    );
    assert_eq!(document.verdict, Verdict::Regression);
}

#[test]
fn test_report_without_master_names_master() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    execute_collect(
        &settings,
        BranchLabel::Feature,
        &registry_with(bundle(&[], &["m1"])),
    )
    .unwrap();

    let err = execute_report(&settings, &ReportArgs::default()).unwrap_err();

    let state_err = err.downcast_ref::<StateError>().expect("StateError");
    assert_eq!(state_err.missing_branch(), Some("master"));
}

#[test]
fn test_report_without_any_state_names_feature() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());

    let err = execute_report(&settings, &ReportArgs::default()).unwrap_err();

    let state_err = err.downcast_ref::<StateError>().expect("StateError");
    assert_eq!(state_err.missing_branch(), Some("feature"));
}

#[test]
fn test_master_requires_feature_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());

    let err = execute_collect(
        &settings,
        BranchLabel::Master,
        &registry_with(ResultBundle::default()),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Missing(_))
    ));
}

#[test]
fn test_master_reuses_snapshot_after_source_changes() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    execute_collect(
        &settings,
        BranchLabel::Feature,
        &registry_with(ResultBundle::default()),
    )
    .unwrap();

    // the master checkout has no (or a different) config file
    std::fs::remove_file(&settings.config_source).unwrap();

    let summary = execute_collect(
        &settings,
        BranchLabel::Master,
        &registry_with(bundle(&[], &["m"])),
    )
    .unwrap();
    assert_eq!(summary.message_count, 1);
}

#[test]
fn test_feature_with_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.config_source = dir.path().join("missing.cfg");

    let err = execute_collect(
        &settings,
        BranchLabel::Feature,
        &registry_with(ResultBundle::default()),
    )
    .unwrap_err();

    assert!(err.downcast_ref::<ConfigError>().is_some());
}

#[test]
fn test_failed_collection_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());

    let err = execute_collect(&settings, BranchLabel::Feature, &broken_registry()).unwrap_err();
    assert!(format!("{:#}", err).contains("Segmentation fault"));

    let store = RunStore::open(&settings.workdir).unwrap();
    assert!(!store.path_for(&settings.tool, BranchLabel::Feature).exists());
}

#[test]
fn test_failed_collection_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let first = bundle(&[("errors", 1)], &["e"]);
    execute_collect(&settings, BranchLabel::Feature, &registry_with(first.clone())).unwrap();

    execute_collect(&settings, BranchLabel::Feature, &broken_registry()).unwrap_err();

    let store = RunStore::open(&settings.workdir).unwrap();
    assert_eq!(store.load(&settings.tool, BranchLabel::Feature).unwrap(), first);
}

#[test]
fn test_unknown_adapter_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());

    let err = execute_collect(
        &settings,
        BranchLabel::Feature,
        &trapdoor::collector::CollectorRegistry::builtin(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownAdapter(name, _)) if name == "canned"
    ));
}

#[test]
fn test_report_json_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let settings = collect_both(
        dir.path(),
        bundle(&[("errors", 2)], &["new one"]),
        bundle(&[("errors", 2)], &[]),
    );
    let output = dir.path().join("artifacts/report.json");

    let args = ReportArgs {
        noisy: true,
        output: Some(output.clone()),
    };
    execute_report(&settings, &args).unwrap();

    let document = read_report(&output).unwrap();
    assert_eq!(document.tool.as_str(), "demo");
    assert_eq!(document.verdict, Verdict::Regression);
    assert_eq!(document.report.new, vec!["new one"]);
}

#[test]
fn test_report_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let settings = collect_both(
        dir.path(),
        bundle(&[("a", 1)], &["x", "y"]),
        bundle(&[("a", 2)], &["y", "z"]),
    );
    let store = RunStore::open(&settings.workdir).unwrap();

    let first = build_report(&store, &settings.tool).unwrap();
    let second = build_report(&store, &settings.tool).unwrap();

    assert_eq!(first, second);
}

/// Settings whose `demo` tool is a `lines` analyzer that sleeps for 5s
#[cfg(unix)]
fn slow_settings(root: &std::path::Path, tool_section_extra: &str) -> Settings {
    let settings = settings(root);
    std::fs::write(
        &settings.config_source,
        format!(
            r#"{{"tools": {{"demo": {{"adapter": "lines", "command": ["sh", "-c", "sleep 5"]{}}}}}}}"#,
            tool_section_extra
        ),
    )
    .unwrap();
    settings
}

#[cfg(unix)]
fn assert_timed_out(settings: &Settings) {
    let start = Instant::now();
    let err = execute_collect(settings, BranchLabel::Feature, &CollectorRegistry::builtin())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CollectionError>(),
        Some(CollectionError::TimedOut { .. })
    ));
    assert!(start.elapsed() < Duration::from_secs(4));

    let store = RunStore::open(&settings.workdir).unwrap();
    assert!(!store.path_for(&settings.tool, BranchLabel::Feature).exists());
}

#[cfg(unix)]
#[test]
fn test_timeout_override_bounds_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = slow_settings(dir.path(), "");
    settings.timeout = Some(Duration::from_secs(1));

    assert_timed_out(&settings);
}

#[cfg(unix)]
#[test]
fn test_config_timeout_bounds_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let settings = slow_settings(dir.path(), r#", "timeout_secs": 1"#);

    assert_timed_out(&settings);
}
