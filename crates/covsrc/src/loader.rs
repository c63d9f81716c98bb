//! The source loading facade.
//!
//! ```text
//! load(path) ─► locator.resolve ─► bytes ─┬─► digest ──────────────┐
//!                   │                     └─► split_text ─► count ─┼─► reconcile ─► Source
//!                   └─ None ─► Ok(None)   provider.coverage_for_file ─┘
//! ```

use crate::coverage::{CoverageMap, CoverageProvider};
use crate::encoding::SourceEncoding;
use crate::lines::split_text;
use crate::locator::SourceLocator;
use crate::reconcile::reconcile;
use crate::result::SourceResult;
use crate::source::Source;
use tracing::debug;

/// Loads sources and aligns them with the coverage supplied by `P`
///
/// Locators are tried in order and the first that finds the file wins. Errors
/// from a locator end the load; they do not fall through to the next one.
#[derive(Debug, Clone)]
pub struct SourceLoader<P> {
    locators: Vec<SourceLocator>,
    encoding: SourceEncoding,
    coverage: P,
}

impl<P: CoverageProvider> SourceLoader<P> {
    /// Create a loader with one locator
    pub fn new(locator: SourceLocator, encoding: SourceEncoding, coverage: P) -> Self {
        Self {
            locators: vec![locator],
            encoding,
            coverage,
        }
    }

    /// Create a loader trying `locators` in order
    pub fn with_locators(locators: Vec<SourceLocator>, encoding: SourceEncoding, coverage: P) -> Self {
        Self {
            locators,
            encoding,
            coverage,
        }
    }

    /// Append a fallback locator
    #[must_use]
    pub fn with_locator(mut self, locator: SourceLocator) -> Self {
        self.locators.push(locator);
        self
    }

    /// Locators in search order
    pub fn locators(&self) -> &[SourceLocator] {
        &self.locators
    }

    /// Encoding used to decode lines
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Coverage provider
    pub fn coverage(&self) -> &P {
        &self.coverage
    }

    /// Load `relative_path`, or `Ok(None)` if no locator can find it
    ///
    /// # Errors
    ///
    /// - [`crate::SourceError::InvalidPath`] for directories and escaping paths
    /// - [`crate::SourceError::FileRead`] if a resolved file cannot be read
    /// - [`crate::SourceError::InvalidCoverageData`] for negative hit counts
    pub fn load(&self, relative_path: &str) -> SourceResult<Option<Source>> {
        let mut located = None;
        for locator in &self.locators {
            located = locator.resolve(relative_path)?;
            if located.is_some() {
                break;
            }
        }
        let Some(file) = located else {
            debug!(relative_path, "no locator found source");
            return Ok(None);
        };

        let line_count = split_text(&self.encoding.decode(&file.bytes)).len();
        let empty = CoverageMap::new();
        let hits = self
            .coverage
            .coverage_for_file(&file.name, &file.path)
            .unwrap_or(&empty);
        let coverage = reconcile(line_count, hits)?;

        debug!(
            name = %file.name,
            lines = line_count,
            instrumented = hits.len(),
            "loaded source"
        );
        Ok(Some(Source::new(file.name, file.digest, coverage)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::coverage::LineHits;
    use crate::result::SourceError;
    use std::fs;
    use tempfile::TempDir;

    const FOO: &[u8] = b"public class Foo {\r\n    \n}\r";

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Foo.java"), FOO).unwrap();
        temp
    }

    #[test]
    fn test_load_aligns_coverage() {
        let temp = fixture();
        let hits = LineHits::new().with_file("Foo.java", CoverageMap::from([(1, 1), (3, 0)]));
        let loader = SourceLoader::new(
            SourceLocator::directory(temp.path()),
            SourceEncoding::Utf8,
            hits,
        );

        let source = loader.load("Foo.java").unwrap().unwrap();
        assert_eq!(source.coverage(), &[Some(1), None, Some(0), None]);
    }

    #[test]
    fn test_load_without_coverage() {
        let temp = fixture();
        let loader = SourceLoader::new(
            SourceLocator::directory(temp.path()),
            SourceEncoding::Utf8,
            LineHits::new(),
        );

        let source = loader.load("Foo.java").unwrap().unwrap();
        assert_eq!(source.coverage(), &[None; 4]);
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp = fixture();
        let loader = SourceLoader::new(
            SourceLocator::directory(temp.path()),
            SourceEncoding::Utf8,
            LineHits::new(),
        );
        assert!(loader.load("Bar.java").unwrap().is_none());
    }

    #[test]
    fn test_load_negative_hits_fails() {
        let temp = fixture();
        let hits = LineHits::new().with_file("Foo.java", CoverageMap::from([(2, -4)]));
        let loader = SourceLoader::new(
            SourceLocator::directory(temp.path()),
            SourceEncoding::Utf8,
            hits,
        );
        assert!(matches!(
            loader.load("Foo.java").unwrap_err(),
            SourceError::InvalidCoverageData { line: 2, hits: -4 }
        ));
    }

    #[test]
    fn test_fallback_locator() {
        let empty = TempDir::new().unwrap();
        let temp = fixture();
        let loader = SourceLoader::new(
            SourceLocator::directory(empty.path()),
            SourceEncoding::Utf8,
            LineHits::new(),
        )
        .with_locator(SourceLocator::directory(temp.path()));

        assert_eq!(loader.locators().len(), 2);
        assert!(loader.load("Foo.java").unwrap().is_some());
    }

    #[test]
    fn test_locator_error_does_not_fall_through() {
        let first = TempDir::new().unwrap();
        fs::create_dir(first.path().join("Foo.java")).unwrap();
        let second = fixture();
        let loader = SourceLoader::with_locators(
            vec![
                SourceLocator::directory(first.path()),
                SourceLocator::directory(second.path()),
            ],
            SourceEncoding::Utf8,
            LineHits::new(),
        );
        assert!(matches!(
            loader.load("Foo.java").unwrap_err(),
            SourceError::InvalidPath { .. }
        ));
    }

    #[test]
    fn test_coverage_keyed_by_resolved_name() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg").join("Foo.java"), FOO).unwrap();
        let name = std::path::Path::new("pkg").join("Foo.java");
        let name = name.to_str().unwrap();

        let hits = LineHits::new().with_file(name, CoverageMap::from([(1, 9)]));
        let loader = SourceLoader::new(
            SourceLocator::scan([temp.path()]),
            SourceEncoding::Utf8,
            hits,
        );

        let source = loader.load("Foo.java").unwrap().unwrap();
        assert_eq!(source.name(), name);
        assert_eq!(source.coverage()[0], Some(9));
    }
}
