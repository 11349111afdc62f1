//! Per-tool noise filtering.

use crate::config::ToolConfig;
use crate::utils::error::ConfigError;
use regex::Regex;

/// Compiled `ignore` and `exclude` patterns of one tool
#[derive(Debug, Default)]
pub struct NoiseFilter {
    ignore: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl NoiseFilter {
    pub fn from_config(config: &ToolConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            ignore: compile_all(&config.ignore)?,
            exclude: compile_all(&config.exclude)?,
        })
    }

    /// Raw output line that is not a diagnostic at all
    pub fn is_noise(&self, line: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(line))
    }

    /// Diagnostic that should not count
    pub fn is_excluded(&self, text: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(text))
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns.iter().map(|p| compile(p)).collect()
}
