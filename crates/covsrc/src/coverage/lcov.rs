//! LCOV tracefile reader
//!
//! Only the records that carry line hits are interpreted:
//!
//! ```text
//! SF:<source file>
//! DA:<line>,<execution count>[,<checksum>]
//! end_of_record
//! ```
//!
//! Everything else (`TN`, `FN`, `FNDA`, `BRDA`, `LF`, `LH`, ...) is skipped.

use super::{CoverageMap, CoverageProvider};
use crate::result::{SourceError, SourceResult};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Line hits read from an LCOV tracefile, keyed by `SF` path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcovCoverage {
    files: BTreeMap<String, CoverageMap>,
    aliases: BTreeMap<String, String>,
}

impl LcovCoverage {
    /// Parse tracefile content
    ///
    /// Repeated `DA` records for one line inside a record are summed. A negative
    /// count is kept as-is so the loader can reject it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::CoverageParse`] for a malformed `DA` record or a
    /// `DA` record outside an `SF` block.
    pub fn parse(content: &str) -> SourceResult<Self> {
        let mut files: BTreeMap<String, CoverageMap> = BTreeMap::new();
        let mut current: Option<String> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if let Some(path) = line.strip_prefix("SF:") {
                let path = path.trim().to_string();
                files.entry(path.clone()).or_default();
                current = Some(path);
            } else if let Some(data) = line.strip_prefix("DA:") {
                let file = current.as_ref().ok_or_else(|| {
                    SourceError::coverage_parse(line_no, "DA record outside of SF block")
                })?;
                let (line, count) = Self::parse_da(data, line_no)?;
                let entry = files.entry(file.clone()).or_default().entry(line).or_insert(0);
                if *entry < 0 {
                    continue;
                }
                *entry = if count < 0 {
                    count
                } else {
                    entry.checked_add(count).ok_or_else(|| {
                        SourceError::coverage_parse(line_no, "hit count overflow")
                    })?
                };
            } else if line == "end_of_record" {
                current = None;
            }
        }

        Ok(Self {
            files,
            aliases: BTreeMap::new(),
        })
    }

    /// Read and parse a tracefile
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> SourceResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SourceError::file_read(path, e))?;
        Self::parse(&content)
    }

    /// Source file paths in sorted order
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of source files in the tracefile
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the tracefile named no sources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Answer lookups for `name` with the hits recorded under `file`
    ///
    /// Returns `false`, leaving the aliases untouched, if `file` is not in the
    /// tracefile or `name` already points at a different file.
    pub fn alias(&mut self, name: impl Into<String>, file: &str) -> bool {
        if !self.files.contains_key(file) {
            return false;
        }
        let name = name.into();
        match self.aliases.get(&name) {
            Some(existing) => existing == file,
            None => {
                self.aliases.insert(name, file.to_string());
                true
            }
        }
    }

    /// Tracefile path an alias resolves to
    #[must_use]
    pub fn aliased(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    fn parse_da(data: &str, line_no: usize) -> SourceResult<(u32, i64)> {
        let mut parts = data.split(',');
        let line = parts
            .next()
            .map(str::trim)
            .and_then(|l| l.parse::<u32>().ok())
            .ok_or_else(|| SourceError::coverage_parse(line_no, format!("bad line number in DA:{data}")))?;
        let count = parts
            .next()
            .map(str::trim)
            .and_then(|c| c.parse::<i64>().ok())
            .ok_or_else(|| SourceError::coverage_parse(line_no, format!("bad hit count in DA:{data}")))?;
        Ok((line, count))
    }
}

impl CoverageProvider for LcovCoverage {
    /// Alias first, then an exact `SF` match, then the single `SF` path whose
    /// trailing components equal `name`
    ///
    /// A suffix shared by several `SF` paths matches none of them.
    fn coverage_for(&self, name: &str) -> Option<&CoverageMap> {
        self.exact(name).or_else(|| self.unique_suffix(name))
    }

    /// Like [`coverage_for`](Self::coverage_for), but an `SF` entry naming the
    /// file's physical path beats any suffix match
    fn coverage_for_file(&self, name: &str, path: &Path) -> Option<&CoverageMap> {
        self.exact(name)
            .or_else(|| self.physical(path))
            .or_else(|| self.unique_suffix(name))
    }
}

impl LcovCoverage {
    fn exact(&self, name: &str) -> Option<&CoverageMap> {
        match self.aliases.get(name) {
            Some(file) => self.files.get(file),
            None => self.files.get(name),
        }
    }

    fn physical(&self, path: &Path) -> Option<&CoverageMap> {
        if let Some(hits) = path.to_str().and_then(|p| self.files.get(p)) {
            return Some(hits);
        }
        let canonical = std::fs::canonicalize(path).ok()?;
        canonical.to_str().and_then(|p| self.files.get(p))
    }

    fn unique_suffix(&self, name: &str) -> Option<&CoverageMap> {
        let wanted = Path::new(name);
        if wanted.as_os_str().is_empty() {
            return None;
        }

        let mut matches = self
            .files
            .iter()
            .filter(|(file, _)| Path::new(file.as_str()).ends_with(wanted));
        let (_, hits) = matches.next()?;
        if matches.next().is_some() {
            debug!(name, "ambiguous tracefile suffix match, ignoring coverage");
            return None;
        }
        Some(hits)
    }
}
