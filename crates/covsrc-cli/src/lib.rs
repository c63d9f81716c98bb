//! covsrc CLI Library
//!
//! Command-line interface for building coverage source reports.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;

pub use commands::{Cli, Commands, DigestArgs, LinesArgs, ReportArgs};
pub use config::{init_tracing, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
