//! Loader configuration
//!
//! ```yaml
//! source_directories:
//!   - src/main/java
//!   - target/generated-sources
//! scan_for_sources: false
//! source_encoding: UTF-8
//! ```

use crate::coverage::CoverageProvider;
use crate::encoding::SourceEncoding;
use crate::loader::SourceLoader;
use crate::locator::SourceLocator;
use crate::result::{SourceError, SourceResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where sources live and how to read them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Source roots in precedence order
    #[serde(default)]
    pub source_directories: Vec<PathBuf>,
    /// Search roots recursively by file name instead of joining paths
    #[serde(default)]
    pub scan_for_sources: bool,
    /// Encoding name, required before a loader can be built
    #[serde(default)]
    pub source_encoding: Option<String>,
}

impl LoaderConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(yaml: &str) -> SourceResult<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| SourceError::config(format!("Failed to parse loader config: {e}")))
    }

    /// Read YAML configuration from a file
    pub fn load(path: &Path) -> SourceResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| SourceError::file_read(path, e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Add a source root
    #[must_use]
    pub fn with_source_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_directories.push(dir.into());
        self
    }

    /// Enable or disable recursive scanning
    #[must_use]
    pub const fn with_scan(mut self, scan: bool) -> Self {
        self.scan_for_sources = scan;
        self
    }

    /// Set the encoding name
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.source_encoding = Some(encoding.into());
        self
    }

    /// Resolve the declared encoding
    pub fn encoding(&self) -> SourceResult<SourceEncoding> {
        self.source_encoding
            .as_deref()
            .ok_or_else(|| SourceError::config("source encoding must be set"))?
            .parse()
    }

    /// Build locators: one scan over every root, or one fixed locator per root
    pub fn build_locators(&self) -> SourceResult<Vec<SourceLocator>> {
        if self.source_directories.is_empty() {
            return Err(SourceError::config(
                "at least one source directory is required",
            ));
        }
        if self.scan_for_sources {
            Ok(vec![SourceLocator::scan(self.source_directories.iter().cloned())])
        } else {
            Ok(self
                .source_directories
                .iter()
                .cloned()
                .map(SourceLocator::directory)
                .collect())
        }
    }

    /// Build a loader reading coverage from `coverage`
    pub fn build_loader<P: CoverageProvider>(&self, coverage: P) -> SourceResult<SourceLoader<P>> {
        let encoding = self.encoding()?;
        let locators = self.build_locators()?;
        Ok(SourceLoader::with_locators(locators, encoding, coverage))
    }
}
