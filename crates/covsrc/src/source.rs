//! Reconciled source records.

use serde::Serialize;

/// One source file with its digest and per-line coverage
///
/// Built once by the loader and immutable afterwards. `coverage` holds one entry
/// per logical line: `None` for lines without instrumentation, `Some(hits)`
/// otherwise, where `Some(0)` means instrumented but never executed. Only the
/// loader builds one, so `coverage` always has one entry per line.
///
/// ```compile_fail
/// let forged: covsrc::Source =
///     serde_json::from_str(r#"{"name":"a","source_digest":"","coverage":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct Source {
    name: String,
    #[serde(rename = "source_digest")]
    digest: String,
    coverage: Vec<Option<u64>>,
}

impl Source {
    pub(crate) fn new(name: String, digest: String, coverage: Vec<Option<u64>>) -> Self {
        Self {
            name,
            digest,
            coverage,
        }
    }

    /// Reported name, relative to the root the file was found under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uppercase hex SHA-512 of the raw file bytes
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Per-line hit counts in file order
    #[must_use]
    pub fn coverage(&self) -> &[Option<u64>] {
        &self.coverage
    }

    /// Number of logical lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.coverage.len()
    }

    /// Lines carrying instrumentation
    #[must_use]
    pub fn relevant_lines(&self) -> usize {
        self.coverage.iter().filter(|c| c.is_some()).count()
    }

    /// Lines executed at least once
    #[must_use]
    pub fn covered_lines(&self) -> usize {
        self.coverage
            .iter()
            .filter(|c| matches!(c, Some(hits) if *hits > 0))
            .count()
    }
}
