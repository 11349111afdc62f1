//! CLI command implementations.
//!
//! Each mode is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collect;
pub mod models;
pub mod report;

// Re-export main command functions
pub use collect::execute_collect;
pub use models::{CollectionSummary, ReportArgs, Settings};
pub use report::{build_report, execute_report};
