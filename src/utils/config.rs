//! Configuration defaults and constants for the CLI.

/// Current persisted run schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Working directory used when `QAWORKDIR` is not set
pub const DEFAULT_WORKDIR: &str = "qaworkdir";

/// Source config copied into the working directory by the feature run
pub const DEFAULT_CONFIG_SOURCE: &str = "tools/qa/trapdoor.cfg";

/// File name of the config snapshot inside the working directory
pub const CONFIG_SNAPSHOT_NAME: &str = "trapdoor.cfg";

/// Prefix of persisted result files: `trapdoor_results_<tool>_<branch>.json`
pub const RESULTS_FILE_PREFIX: &str = "trapdoor_results";

/// Largest count a single counter key may report; deltas stay within `i64`
pub const MAX_COUNT: u64 = i64::MAX as u64;

// Linters conventionally exit 1 when they report problems
pub const DEFAULT_ACCEPTED_EXIT_CODES: &[i32] = &[0, 1];

// Process exit statuses. Regression and failure must never share a code.
pub const EXIT_OK: u8 = 0;
pub const EXIT_REGRESSION: u8 = 1;
pub const EXIT_FAILURE: u8 = 2;
