//! covsrc CLI: reconcile source files with line coverage
//!
//! ## Usage
//!
//! ```bash
//! covsrc report --lcov lcov.info -s src/main/java -e UTF-8   # JSON report to stdout
//! covsrc report --lcov lcov.info -s src --scan -o report.json
//! covsrc digest src/main/java/org/Foo.java                   # SHA-512 of raw bytes
//! covsrc lines src/main/java/org/Foo.java                    # logical line count
//! ```

use clap::Parser;
use covsrc_cli::{
    handlers::{execute_digest, execute_lines, execute_report},
    init_tracing, Cli, CliConfig, CliResult, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_tracing(verbosity);
    let config = CliConfig::new().with_verbosity(verbosity);

    match cli.command {
        Commands::Report(args) => execute_report(&config, &args),
        Commands::Digest(args) => execute_digest(&config, &args),
        Commands::Lines(args) => execute_lines(&config, &args),
    }
}
