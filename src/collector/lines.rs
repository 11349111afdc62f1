//! Line-oriented analyzer adapter.
//!
//! Handles the classic `path:line[:col]: CODE text` output of linters and
//! compilers. Each matching line is one diagnostic; the counter is keyed by
//! code and path.

use super::filter::{compile, NoiseFilter};
use super::process::run_analyzer;
use super::Collector;
use crate::config::ToolConfig;
use crate::model::{Counter, MessageSet, ResultBundle};
use crate::utils::error::{CollectionError, ConfigError};
use log::{debug, info};
use regex::Regex;

/// Pattern used when the tool section sets none
pub const DEFAULT_LINE_PATTERN: &str =
    r"^(?P<path>[^:\s]+):(?P<line>\d+):(?:(?P<col>\d+):)?\s*(?P<code>[A-Za-z]+\d*)\b";

/// Collector for analyzers printing one diagnostic per line
#[derive(Debug, Default, Clone, Copy)]
pub struct LinesCollector;

impl Collector for LinesCollector {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn collect(&self, config: &ToolConfig) -> Result<ResultBundle, CollectionError> {
        // Compile before running so a bad pattern does not cost an analyzer run
        let parser = LineParser::from_config(config)?;
        let output = run_analyzer(config, config.timeout())?;
        let bundle = parser.parse(&output.stdout)?;
        info!(
            "Parsed {} diagnostics in {} categories",
            bundle.messages().len(),
            bundle.counter().len()
        );
        Ok(bundle)
    }
}

/// Turns analyzer stdout into a result bundle
#[derive(Debug)]
pub struct LineParser {
    pattern: Regex,
    filter: NoiseFilter,
}

impl LineParser {
    pub fn from_config(config: &ToolConfig) -> Result<Self, ConfigError> {
        let source = config.pattern.as_deref().unwrap_or(DEFAULT_LINE_PATTERN);
        let pattern = compile(source)?;
        if !pattern.capture_names().any(|name| name == Some("code")) {
            return Err(ConfigError::MissingCodeGroup(source.to_string()));
        }

        Ok(Self {
            pattern,
            filter: NoiseFilter::from_config(config)?,
        })
    }

    /// Parse every line of `text`
    ///
    /// Blank and ignored lines are skipped. A line that is neither noise nor
    /// a match for the pattern fails the whole parse.
    pub fn parse(&self, text: &str) -> Result<ResultBundle, CollectionError> {
        let mut counter = Counter::new();
        let mut messages = MessageSet::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || self.filter.is_noise(line) {
                continue;
            }

            let caps = self
                .pattern
                .captures(line)
                .ok_or_else(|| CollectionError::Unparseable {
                    line_no: idx + 1,
                    line: line.to_string(),
                })?;

            let message = caps
                .name("message")
                .map_or(line, |m| m.as_str().trim());
            if self.filter.is_excluded(message) {
                debug!("Excluded: {}", message);
                continue;
            }

            let code = caps.name("code").map_or("", |m| m.as_str());
            let key = match caps.name("path") {
                Some(path) => format!("{} {}", code, path.as_str()),
                None => code.to_string(),
            };

            counter.increment(key);
            messages.insert(message);
        }

        Ok(ResultBundle::new(counter, messages))
    }
}
