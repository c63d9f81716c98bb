//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// covsrc: reconcile source files with line coverage
#[derive(Parser, Debug)]
#[command(name = "covsrc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a source report from LCOV coverage
    Report(ReportArgs),

    /// Print the SHA-512 digest of files
    Digest(DigestArgs),

    /// Print the logical line count of files
    Lines(LinesArgs),
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// LCOV tracefile with line hits
    #[arg(long)]
    pub lcov: PathBuf,

    /// YAML loader configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source root, repeatable, in precedence order
    #[arg(short = 's', long = "source-dir")]
    pub source_dirs: Vec<PathBuf>,

    /// Search source roots recursively by file name
    #[arg(long)]
    pub scan: bool,

    /// Source encoding
    #[arg(short, long, env = "COVSRC_ENCODING")]
    pub encoding: Option<String>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Files to load; defaults to every file in the tracefile
    pub files: Vec<String>,
}

/// Arguments for the digest command
#[derive(Parser, Debug)]
pub struct DigestArgs {
    /// Files to digest
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the lines command
#[derive(Parser, Debug)]
pub struct LinesArgs {
    /// Files to count
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Source encoding
    #[arg(short, long, default_value = "UTF-8")]
    pub encoding: String,
}
