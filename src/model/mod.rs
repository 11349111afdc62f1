//! Core data model: counters, message sets and the result bundles built from them.

pub mod counter;
pub mod schema;

pub use counter::{Counter, MessageSet};
pub use schema::{BranchLabel, PersistedRun, ResultBundle, ToolName};
