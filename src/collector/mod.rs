//! Pluggable analyzer collectors.
//!
//! A collector runs one external analyzer and normalizes its output into a
//! `ResultBundle`. Collectors are looked up by adapter name in an explicit
//! registry; each tool section of the config names the adapter it uses.
//!
//! # Example
//! ```ignore
//! use trapdoor::collector::CollectorRegistry;
//!
//! let registry = CollectorRegistry::builtin();
//! let bundle = registry.get(&tool_config.adapter)?.collect(&tool_config)?;
//! ```

mod filter;
mod json;
mod lines;
mod process;

pub use filter::NoiseFilter;
pub use json::{parse_json_results, JsonCollector};
pub use lines::{LineParser, LinesCollector, DEFAULT_LINE_PATTERN};
pub use process::{run_analyzer, AnalyzerOutput};

use crate::config::ToolConfig;
use crate::model::ResultBundle;
use crate::utils::error::{CollectionError, ConfigError};
use std::collections::BTreeMap;

/// Single capability every analyzer adapter provides
///
/// Must be deterministic for an unchanged codebase and config. A failing
/// analyzer is an error, never an empty bundle.
pub trait Collector {
    /// Adapter name used in the config's `adapter` field
    fn name(&self) -> &'static str;

    fn collect(&self, config: &ToolConfig) -> Result<ResultBundle, CollectionError>;
}

/// Lookup table from adapter name to collector
pub struct CollectorRegistry {
    collectors: BTreeMap<&'static str, Box<dyn Collector>>,
}

impl CollectorRegistry {
    /// Registry with no adapters
    pub fn empty() -> Self {
        Self {
            collectors: BTreeMap::new(),
        }
    }

    /// Registry with the built-in `lines` and `json` adapters
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(LinesCollector));
        registry.register(Box::new(JsonCollector));
        registry
    }

    /// Add a collector, replacing any earlier one with the same name
    pub fn register(&mut self, collector: Box<dyn Collector>) {
        self.collectors.insert(collector.name(), collector);
    }

    pub fn get(&self, adapter: &str) -> Result<&dyn Collector, ConfigError> {
        self.collectors
            .get(adapter)
            .map(|c| &**c)
            .ok_or_else(|| ConfigError::UnknownAdapter(adapter.to_string(), self.names().join(", ")))
    }

    /// Registered adapter names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.collectors.keys().copied().collect()
    }
}
