//! JSON analyzer adapter.
//!
//! For analyzers wrapped by a script that already produces the normalized
//! shape: `{"counter": {"key": n, ...}, "messages": ["...", ...]}`.

use super::filter::NoiseFilter;
use super::process::run_analyzer;
use super::Collector;
use crate::config::ToolConfig;
use crate::model::{Counter, MessageSet, ResultBundle};
use crate::utils::config::MAX_COUNT;
use crate::utils::error::CollectionError;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct JsonResults {
    #[serde(default)]
    counter: BTreeMap<String, u64>,

    #[serde(default)]
    messages: Vec<String>,
}

/// Collector for analyzers printing a single JSON document
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCollector;

impl Collector for JsonCollector {
    fn name(&self) -> &'static str {
        "json"
    }

    fn collect(&self, config: &ToolConfig) -> Result<ResultBundle, CollectionError> {
        let filter = NoiseFilter::from_config(config)?;
        let output = run_analyzer(config, config.timeout())?;
        parse_json_results(&output.stdout, &filter)
    }
}

/// Parse the JSON document, dropping excluded messages and counter keys
pub fn parse_json_results(
    text: &str,
    filter: &NoiseFilter,
) -> Result<ResultBundle, CollectionError> {
    let results: JsonResults = serde_json::from_str(text)?;

    if let Some((key, &count)) = results.counter.iter().find(|(_, &n)| n > MAX_COUNT) {
        return Err(CollectionError::CountOutOfRange {
            key: key.clone(),
            count,
        });
    }

    let counter: Counter = results
        .counter
        .into_iter()
        .filter(|(key, _)| !filter.is_excluded(key))
        .collect();

    let messages: MessageSet = results
        .messages
        .into_iter()
        .filter(|msg| {
            let keep = !filter.is_excluded(msg);
            if !keep {
                debug!("Excluded: {}", msg);
            }
            keep
        })
        .collect();

    Ok(ResultBundle::new(counter, messages))
}
