#![allow(dead_code)]

use std::path::{Path, PathBuf};
use trapdoor::collector::{Collector, CollectorRegistry};
use trapdoor::commands::Settings;
use trapdoor::config::ToolConfig;
use trapdoor::model::{Counter, MessageSet, ResultBundle, ToolName};
use trapdoor::utils::CollectionError;

/// Collector that returns a canned bundle, standing in for a real analyzer
pub struct CannedCollector(pub ResultBundle);

impl Collector for CannedCollector {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn collect(&self, _config: &ToolConfig) -> Result<ResultBundle, CollectionError> {
        Ok(self.0.clone())
    }
}

/// Collector whose analyzer always fails
pub struct BrokenCollector;

impl Collector for BrokenCollector {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn collect(&self, _config: &ToolConfig) -> Result<ResultBundle, CollectionError> {
        Err(CollectionError::Unparseable {
            line_no: 1,
            line: "Segmentation fault".to_string(),
        })
    }
}

pub fn bundle(counter: &[(&str, u64)], messages: &[&str]) -> ResultBundle {
    ResultBundle::new(
        counter.iter().map(|&(k, n)| (k, n)).collect::<Counter>(),
        messages.iter().copied().collect::<MessageSet>(),
    )
}

pub fn registry_with(bundle: ResultBundle) -> CollectorRegistry {
    let mut registry = CollectorRegistry::empty();
    registry.register(Box::new(CannedCollector(bundle)));
    registry
}

pub fn broken_registry() -> CollectorRegistry {
    let mut registry = CollectorRegistry::empty();
    registry.register(Box::new(BrokenCollector));
    registry
}

/// Write a config with a single `demo` tool using the canned adapter
pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("trapdoor.cfg");
    std::fs::write(
        &path,
        r#"{"tools": {"demo": {"adapter": "canned", "command": ["demo-analyzer"]}}}"#,
    )
    .unwrap();
    path
}

pub fn settings(root: &Path) -> Settings {
    Settings {
        workdir: root.join("qaworkdir"),
        config_source: write_config(root),
        ..Settings::new(ToolName::new("demo").unwrap())
    }
}
