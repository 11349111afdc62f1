//! Trapdoor CLI
//!
//! Regression gate for QA tools. Runs an analyzer on the feature branch and
//! on master, then reports whether the feature branch made anything worse.

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use trapdoor::collector::CollectorRegistry;
use trapdoor::commands::{execute_collect, execute_report, ReportArgs, Settings};
use trapdoor::diff::Verdict;
use trapdoor::model::{BranchLabel, ToolName};
use trapdoor::utils::config::{
    DEFAULT_CONFIG_SOURCE, DEFAULT_WORKDIR, EXIT_FAILURE, EXIT_OK, EXIT_REGRESSION,
};

/// Trapdoor - fail CI when a change makes a QA tool report more problems
#[derive(Parser, Debug)]
#[command(name = "trapdoor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pass to run
    #[arg(value_enum)]
    mode: Mode,

    /// Wrapped analyzer, as named under "tools" in the config
    #[arg(short, long, env = "TRAPDOOR_TOOL")]
    tool: ToolName,

    /// Working directory for persisted results and the config snapshot
    #[arg(long, env = "QAWORKDIR", default_value = DEFAULT_WORKDIR)]
    workdir: PathBuf,

    /// Config file copied into the working directory by the feature pass
    #[arg(short, long, env = "TRAPDOOR_CONFIG", default_value = DEFAULT_CONFIG_SOURCE)]
    config: PathBuf,

    /// Kill the analyzer after this many seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Also print output for problems that did not deteriorate (report only)
    #[arg(short, long)]
    noisy: bool,

    /// Write the report as JSON to this path (report only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Available modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run the analyzer on the feature branch and persist the result
    Feature,
    /// Run the analyzer on master and persist the result
    Master,
    /// Compare the persisted results and exit 1 on regression
    Report,
}

fn main() -> ExitCode {
    // Parse CLI arguments; usage errors exit with 2
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let settings = Settings {
        tool: cli.tool,
        workdir: cli.workdir,
        config_source: cli.config,
        timeout: cli.timeout.map(Duration::from_secs),
    };

    let branch = match cli.mode {
        Mode::Feature => BranchLabel::Feature,
        Mode::Master => BranchLabel::Master,
        Mode::Report => {
            let args = ReportArgs {
                noisy: cli.noisy,
                output: cli.output,
            };
            return Ok(match execute_report(&settings, &args)? {
                Verdict::GoodEnough => EXIT_OK,
                Verdict::Regression => EXIT_REGRESSION,
            });
        }
    };

    if cli.noisy || cli.output.is_some() {
        warn!("--noisy and --output only apply to report mode; ignoring");
    }

    let registry = CollectorRegistry::builtin();
    execute_collect(&settings, branch, &registry)?;
    Ok(EXIT_OK)
}
