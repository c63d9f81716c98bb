//! Line coverage input.
//!
//! The loader does not parse coverage itself. It asks a [`CoverageProvider`] for
//! the hits of each resolved file. Two providers ship with the crate:
//!
//! - [`LineHits`]: an in-memory map, filled programmatically
//! - [`LcovCoverage`]: parsed from an LCOV tracefile

mod lcov;

pub use lcov::LcovCoverage;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Hit counts for one file, keyed by 1-based line number
pub type CoverageMap = BTreeMap<u32, i64>;

/// Supplies per-file line hits to the loader
pub trait CoverageProvider {
    /// Hits for the file reported under `name`, if any are known
    fn coverage_for(&self, name: &str) -> Option<&CoverageMap>;

    /// Hits for a resolved file, given both its reported name and where it was
    /// read from
    ///
    /// Providers keyed by physical location override this. The default ignores
    /// `path`.
    fn coverage_for_file(&self, name: &str, path: &Path) -> Option<&CoverageMap> {
        let _ = path;
        self.coverage_for(name)
    }
}

impl<T: CoverageProvider + ?Sized> CoverageProvider for &T {
    fn coverage_for(&self, name: &str) -> Option<&CoverageMap> {
        (**self).coverage_for(name)
    }

    fn coverage_for_file(&self, name: &str, path: &Path) -> Option<&CoverageMap> {
        (**self).coverage_for_file(name, path)
    }
}

/// In-memory coverage keyed by exact file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHits {
    files: HashMap<String, CoverageMap>,
}

impl LineHits {
    /// Create an empty set of hits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file's hits
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, hits: CoverageMap) -> Self {
        self.files.insert(name.into(), hits);
        self
    }

    /// Record hits for a single line, replacing any previous count
    pub fn set_hits(&mut self, name: &str, line: u32, hits: i64) {
        self.files
            .entry(name.to_string())
            .or_default()
            .insert(line, hits);
    }

    /// Number of files with recorded hits
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no file has recorded hits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl CoverageProvider for LineHits {
    fn coverage_for(&self, name: &str) -> Option<&CoverageMap> {
        self.files.get(name)
    }
}
