//! covsrc: Source Reconciliation for Line-Coverage Reports
//!
//! Matches the files named in coverage data with the sources on disk and turns
//! each one into an upload-ready record: name, SHA-512 digest, and one hit count
//! per logical line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    COVSRC Architecture                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Source     │    │ Digest +   │    │ Reconcile  │            │
//! │   │ Locator    │───►│ Line Split │───►│ with Hits  │───► Source │
//! │   │ (dir/scan) │    │ (one read) │    │            │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use covsrc::{CoverageMap, LineHits, SourceEncoding, SourceLoader, SourceLocator};
//!
//! let hits = LineHits::new().with_file("Foo.java", CoverageMap::from([(1, 3)]));
//! let loader = SourceLoader::new(
//!     SourceLocator::directory("src/main/java"),
//!     SourceEncoding::Utf8,
//!     hits,
//! );
//!
//! if let Some(source) = loader.load("Foo.java")? {
//!     println!("{} {} {:?}", source.name(), source.digest(), source.coverage());
//! }
//! # Ok::<(), covsrc::SourceError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod coverage;
pub mod digest;
pub mod encoding;
pub mod lines;
pub mod loader;
pub mod locator;
pub mod reconcile;
pub mod report;
pub mod result;
pub mod source;

pub use config::LoaderConfig;
pub use coverage::{CoverageMap, CoverageProvider, LcovCoverage, LineHits};
pub use digest::{digest_hex, DigestReader, Sha512Digest, DIGEST_HEX_LEN};
pub use encoding::SourceEncoding;
pub use lines::{line_count, split_lines};
pub use loader::SourceLoader;
pub use locator::{DirectoryLocator, LocatedFile, ScanLocator, SourceLocator};
pub use reconcile::reconcile;
pub use report::SourceReport;
pub use result::{SourceError, SourceResult};
pub use source::Source;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        CoverageMap, CoverageProvider, LcovCoverage, LineHits, LoaderConfig, Source,
        SourceEncoding, SourceError, SourceLoader, SourceLocator, SourceReport, SourceResult,
    };
}
