//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command and the
//! pure helpers it is built from.

pub mod digest;
pub mod lines;
pub mod report;

pub use digest::{digest_file, execute_digest};
pub use lines::{count_file_lines, execute_lines};
pub use report::{build_loader_config, execute_report, request_name};
