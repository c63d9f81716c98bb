//! Lines command handler

use crate::commands::LinesArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use covsrc::{split_lines, SourceEncoding, SourceError};
use std::path::Path;

/// Execute the lines command
pub fn execute_lines(_config: &CliConfig, args: &LinesArgs) -> CliResult<()> {
    let encoding: SourceEncoding = args.encoding.parse()?;
    for path in &args.files {
        let count = count_file_lines(path, encoding)?;
        println!("{count}  {}", path.display());
    }
    Ok(())
}

/// Count logical lines of a file as the loader would
pub fn count_file_lines(path: &Path, encoding: SourceEncoding) -> CliResult<usize> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::file_read(path, e))?;
    Ok(split_lines(&bytes, encoding).len())
}
