//! Trapdoor
//!
//! Regression detection for QA and static-analysis tools. An analyzer is run
//! against a feature branch and against master in two separate invocations;
//! a third invocation compares the persisted results and fails when the
//! feature branch introduces new messages or raises a counter.
//!
//! This crate provides the core implementation for the `trapdoor` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trapdoor feature --tool pycodestyle   # on the feature checkout
//! trapdoor master --tool pycodestyle    # on the master checkout
//! trapdoor report --tool pycodestyle    # exit 1 on regression
//! ```

pub mod collector;
pub mod commands;
pub mod config;
pub mod diff;
pub mod model;
pub mod output;
pub mod store;
pub mod utils;
