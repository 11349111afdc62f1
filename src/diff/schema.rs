//! Schema definitions for regression reports.
//!
//! Defines the structures that represent differences between the feature
//! and master result bundles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Complete comparison of a feature run against a master run
///
/// All message lists are sorted lexicographically. Counter delta maps only
/// hold strictly positive entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionReport {
    /// In master but not in feature (fixed by the change)
    pub resolved: Vec<String>,

    /// In both runs
    pub unchanged: Vec<String>,

    /// In feature but not in master (introduced by the change)
    pub new: Vec<String>,

    /// `master - feature` per category, where the count went down
    pub resolved_counter_deltas: BTreeMap<String, u64>,

    /// `feature - master` per category, where the count went up
    pub new_counter_deltas: BTreeMap<String, u64>,
}

impl RegressionReport {
    pub fn verdict(&self) -> Verdict {
        let counters_up = self.new_counter_deltas.values().any(|&n| n > 0);
        if !self.new.is_empty() || counters_up {
            Verdict::Regression
        } else {
            Verdict::GoodEnough
        }
    }

    pub fn is_regression(&self) -> bool {
        self.verdict() == Verdict::Regression
    }
}

/// Outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing got worse
    GoodEnough,
    /// New messages appeared or a counter went up
    Regression,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::GoodEnough => f.write_str("GOOD ENOUGH"),
            Verdict::Regression => f.write_str("REGRESSION"),
        }
    }
}
