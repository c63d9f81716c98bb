//! Source file resolution.
//!
//! A reported coverage path is mapped to a physical file by one of two strategies:
//!
//! - [`DirectoryLocator`]: join the path onto one fixed root
//! - [`ScanLocator`]: search one or more roots recursively for the file name
//!
//! Both return `Ok(None)` when nothing matches. The file is read exactly once and
//! hashed while it is read, so the digest always describes the returned bytes.

use crate::digest::DigestReader;
use crate::result::{SourceError, SourceResult};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A resolved source file with its raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFile {
    /// Name to report, relative to the root it was found under
    pub name: String,
    /// Physical location on disk
    pub path: PathBuf,
    /// Raw bytes exactly as stored
    pub bytes: Vec<u8>,
    /// Digest of `bytes`
    pub digest: String,
}

/// Resolves a relative path under a single fixed root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocator {
    root: PathBuf,
}

impl DirectoryLocator {
    /// Create a locator rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative_path` under the root
    ///
    /// Containment is checked on the path as written. Symlinks below the root
    /// are followed wherever they point, as they are when scanning.
    ///
    /// # Errors
    ///
    /// - [`SourceError::InvalidPath`] if the path escapes the root or names a directory
    /// - [`SourceError::FileRead`] if the file exists but cannot be read
    pub fn resolve(&self, relative_path: &str) -> SourceResult<Option<LocatedFile>> {
        check_contained(relative_path)?;
        let path = self.root.join(relative_path);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(root = %self.root.display(), relative_path, "source not found");
                return Ok(None);
            }
            Err(e) => return Err(SourceError::file_read(path, e)),
        };

        if metadata.is_dir() {
            return Err(SourceError::invalid_path(relative_path, "is a directory"));
        }

        let (bytes, digest) = read_file(&path)?;
        Ok(Some(LocatedFile {
            name: relative_path.to_string(),
            path,
            bytes,
            digest,
        }))
    }
}

/// Searches roots recursively for a file with the requested name
///
/// Roots are searched in declaration order and the first match wins. Within a
/// root the walk is depth-first with entries sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLocator {
    roots: Vec<PathBuf>,
}

impl ScanLocator {
    /// Create a locator over `roots`
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Scan roots in search order
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the first file named like the last segment of `relative_path`
    ///
    /// The reported name is the matched file's path relative to its scan root.
    /// Directories never match.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FileRead`] if the matched file cannot be read
    pub fn resolve(&self, relative_path: &str) -> SourceResult<Option<LocatedFile>> {
        let Some(file_name) = Path::new(relative_path).file_name() else {
            return Ok(None);
        };

        for root in &self.roots {
            if !root.is_dir() {
                debug!(root = %root.display(), "skipping missing scan root");
                continue;
            }

            let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() || entry.file_name() != file_name {
                    continue;
                }

                let name = entry
                    .path()
                    .strip_prefix(root)
                    .map_err(|e| SourceError::invalid_path(relative_path, e.to_string()))?
                    .to_string_lossy()
                    .into_owned();
                debug!(root = %root.display(), %name, "scan matched source");

                let path = entry.into_path();
                let (bytes, digest) = read_file(&path)?;
                return Ok(Some(LocatedFile {
                    name,
                    path,
                    bytes,
                    digest,
                }));
            }
        }

        Ok(None)
    }
}

/// Strategy for turning a reported path into a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Join onto one fixed root
    Directory(DirectoryLocator),
    /// Recursive search across roots
    Scan(ScanLocator),
}

impl SourceLocator {
    /// Fixed-directory strategy
    #[must_use]
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::Directory(DirectoryLocator::new(root))
    }

    /// Recursive scan strategy
    #[must_use]
    pub fn scan<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::Scan(ScanLocator::new(roots))
    }

    /// Resolve and read `relative_path`
    ///
    /// # Errors
    ///
    /// See [`DirectoryLocator::resolve`] and [`ScanLocator::resolve`]
    pub fn resolve(&self, relative_path: &str) -> SourceResult<Option<LocatedFile>> {
        match self {
            Self::Directory(locator) => locator.resolve(relative_path),
            Self::Scan(locator) => locator.resolve(relative_path),
        }
    }
}

/// Reject paths that could leave the root they are joined onto
fn check_contained(relative_path: &str) -> SourceResult<()> {
    for component in Path::new(relative_path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(SourceError::invalid_path(
                    relative_path,
                    "parent directory references are not allowed",
                ))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(SourceError::invalid_path(
                    relative_path,
                    "absolute paths are not allowed",
                ))
            }
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> SourceResult<(Vec<u8>, String)> {
    let file = File::open(path).map_err(|e| SourceError::file_read(path, e))?;
    let capacity = file
        .metadata()
        .map_or(0, |m| usize::try_from(m.len()).unwrap_or(0));
    let mut reader = DigestReader::new(file);
    let mut bytes = Vec::with_capacity(capacity);
    reader
        .read_all(&mut bytes)
        .map_err(|e| SourceError::file_read(path, e))?;
    Ok((bytes, reader.hex_digest()))
}
