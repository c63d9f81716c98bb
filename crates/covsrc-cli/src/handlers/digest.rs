//! Digest command handler

use crate::commands::DigestArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use covsrc::{DigestReader, SourceError};
use std::fs::File;
use std::io;
use std::path::Path;

/// Execute the digest command
pub fn execute_digest(_config: &CliConfig, args: &DigestArgs) -> CliResult<()> {
    for path in &args.files {
        let digest = digest_file(path)?;
        println!("{digest}  {}", path.display());
    }
    Ok(())
}

/// Stream a file through SHA-512 without holding it in memory
pub fn digest_file(path: &Path) -> CliResult<String> {
    let file = File::open(path).map_err(|e| SourceError::file_read(path, e))?;
    let mut reader = DigestReader::new(file);
    io::copy(&mut reader, &mut io::sink()).map_err(|e| SourceError::file_read(path, e))?;
    Ok(reader.hex_digest())
}
