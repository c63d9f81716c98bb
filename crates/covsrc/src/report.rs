//! Report assembly
//!
//! Collects loaded sources into the upload payload:
//!
//! ```json
//! {"source_files": [{"name": "...", "source_digest": "...", "coverage": [1, null, 0]}]}
//! ```

use crate::coverage::CoverageProvider;
use crate::loader::SourceLoader;
use crate::result::SourceResult;
use crate::source::Source;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Sources gathered for one upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct SourceReport {
    /// Loaded sources, in request order
    pub source_files: Vec<Source>,
    /// Requested names no locator could find
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl SourceReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every name through `loader`
    ///
    /// Names that cannot be found are recorded in `skipped`.
    ///
    /// # Errors
    ///
    /// Stops at the first load error and returns it
    pub fn collect<P, I, S>(loader: &SourceLoader<P>, names: I) -> SourceResult<Self>
    where
        P: CoverageProvider,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Self::new();
        for name in names {
            let name = name.as_ref();
            match loader.load(name)? {
                Some(source) => report.source_files.push(source),
                None => {
                    warn!(name, "source not found, skipping");
                    report.skipped.push(name.to_string());
                }
            }
        }
        Ok(report)
    }

    /// Add a loaded source
    pub fn push(&mut self, source: Source) {
        self.source_files.push(source);
    }

    /// Total logical lines across sources
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.source_files.iter().map(Source::line_count).sum()
    }

    /// Instrumented lines across sources
    #[must_use]
    pub fn lines_found(&self) -> usize {
        self.source_files.iter().map(Source::relevant_lines).sum()
    }

    /// Executed lines across sources
    #[must_use]
    pub fn lines_hit(&self) -> usize {
        self.source_files.iter().map(Source::covered_lines).sum()
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> SourceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to `path`
    pub fn save(&self, path: &Path) -> SourceResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
