//! Regression detection between two result bundles.
//!
//! Partitions the messages of both runs into resolved, unchanged and new,
//! and reports which counters went down or up.
//!
//! # Example
//! ```ignore
//! use trapdoor::diff::{compare_results, Verdict};
//!
//! let report = compare_results(&feature, &master);
//! if report.verdict() == Verdict::Regression {
//!     // fail the CI job
//! }
//! ```

mod engine;
mod schema;

// Public API exports
pub use engine::compare_results;
pub use schema::{RegressionReport, Verdict};
