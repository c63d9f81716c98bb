//! End-to-end loader tests against real directory trees.
//!
//! Both locator strategies must agree on digest and line count for the same bytes,
//! and the filesystem edge cases (missing files, directories, escaping paths)
//! must surface the same way regardless of which report builder drives them.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use covsrc::prelude::*;
use std::fs;
use std::path::{Path, MAIN_SEPARATOR_STR};
use tempfile::TempDir;

const FOO: &str = "public class Foo {\r\n    \n}\r";
const FOO_DIGEST: &str = "27F0B29785725F4946DBD05F7963E507B8DB735C2803BBB80C93ECB02291B2E2F9B03CBF27526DB68B6A862F1C6541275CD413A1CCD3E07209B9CAE0C04163C6";

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn directory_loader(root: &Path) -> SourceLoader<LineHits> {
    SourceLoader::new(
        SourceLocator::directory(root),
        SourceEncoding::Utf8,
        LineHits::new(),
    )
}

fn scan_loader(roots: &[&Path]) -> SourceLoader<LineHits> {
    SourceLoader::new(
        SourceLocator::scan(roots.iter().copied()),
        SourceEncoding::Utf8,
        LineHits::new(),
    )
}

// ============================================================================
// Directory strategy
// ============================================================================

#[test]
fn test_missing_source_file_from_directory() {
    let temp = TempDir::new().unwrap();
    assert!(directory_loader(temp.path()).load("Foo.java").unwrap().is_none());
}

#[test]
fn test_directory_source_is_invalid() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();

    let err = directory_loader(temp.path()).load("sub").unwrap_err();
    assert!(matches!(err, SourceError::InvalidPath { .. }));
}

#[test]
fn test_directory_load_source() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", FOO);

    let source = directory_loader(temp.path()).load("Foo.java").unwrap().unwrap();
    assert_eq!(source.name(), "Foo.java");
    assert_eq!(source.digest(), FOO_DIGEST);
    assert_eq!(source.coverage().len(), 4);
}

#[test]
fn test_directory_path_escape_is_invalid() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "outside/Foo.java", FOO);
    let root = temp.path().join("src");
    fs::create_dir(&root).unwrap();

    let err = directory_loader(&root)
        .load("../outside/Foo.java")
        .unwrap_err();
    assert!(matches!(err, SourceError::InvalidPath { .. }));
}

// ============================================================================
// Scan strategy
// ============================================================================

#[test]
fn test_missing_source_file_from_scan() {
    let temp = TempDir::new().unwrap();
    assert!(scan_loader(&[temp.path()]).load("Foo.java").unwrap().is_none());
}

#[test]
fn test_scan_directory_is_not_a_match() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();

    assert!(scan_loader(&[temp.path()]).load("sub").unwrap().is_none());
}

#[test]
fn test_scan_load_source() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "level1/level2/level3/AFile.java", FOO);
    write(temp.path(), "level1/level2/level3/BFile.java", FOO);
    let loader = scan_loader(&[temp.path()]);

    for file in ["AFile.java", "BFile.java"] {
        let source = loader.load(file).unwrap().unwrap();
        let expected = ["level1", "level2", "level3", file].join(MAIN_SEPARATOR_STR);
        assert_eq!(source.name(), expected);
        assert_eq!(source.digest(), FOO_DIGEST);
        assert_eq!(source.coverage().len(), 4);
    }
}

#[test]
fn test_scan_first_root_precedence() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(first.path(), "deep/pkg/Foo.java", "first");
    write(second.path(), "Foo.java", "second\nfile");

    let source = scan_loader(&[first.path(), second.path()])
        .load("Foo.java")
        .unwrap()
        .unwrap();
    let expected = ["deep", "pkg", "Foo.java"].join(MAIN_SEPARATOR_STR);
    assert_eq!(source.name(), expected);
    assert_eq!(source.line_count(), 1);
}

// ============================================================================
// Cross-strategy properties
// ============================================================================

#[test]
fn test_strategies_share_digest_and_length() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", FOO);

    let direct = directory_loader(temp.path()).load("Foo.java").unwrap().unwrap();
    let scanned = scan_loader(&[temp.path()]).load("Foo.java").unwrap().unwrap();
    assert_eq!(direct.digest(), scanned.digest());
    assert_eq!(direct.coverage().len(), scanned.coverage().len());
}

#[test]
fn test_same_digest_different_line_encodings() {
    // Identical bytes, different declared encodings
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Latin.java"), b"caf\xE9\nbar").unwrap();

    let utf8 = directory_loader(temp.path()).load("Latin.java").unwrap().unwrap();
    let latin1 = SourceLoader::new(
        SourceLocator::directory(temp.path()),
        SourceEncoding::Latin1,
        LineHits::new(),
    )
    .load("Latin.java")
    .unwrap()
    .unwrap();
    assert_eq!(utf8.digest(), latin1.digest());
    assert_eq!(utf8.line_count(), 2);
    assert_eq!(latin1.line_count(), 2);
}

#[test]
fn test_lcov_driven_report() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/main/java/org/Foo.java", "a\nb\nc\n");
    let lcov = LcovCoverage::parse(&format!(
        "SF:{}\nDA:1,4\nDA:2,0\nDA:9,1\nend_of_record\n",
        temp.path().join("src/main/java/org/Foo.java").display()
    ))
    .unwrap();

    let config = LoaderConfig::new()
        .with_source_directory(temp.path().join("src/main/java"))
        .with_encoding("UTF-8");
    let loader = config.build_loader(&lcov).unwrap();

    let report = SourceReport::collect(&loader, ["org/Foo.java", "org/Missing.java"]).unwrap();
    assert_eq!(report.source_files.len(), 1);
    assert_eq!(report.skipped, vec!["org/Missing.java".to_string()]);

    let source = &report.source_files[0];
    assert_eq!(source.coverage(), &[Some(4), Some(0), None, None]);
}

#[test]
fn test_lcov_same_file_name_uses_located_entry() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", "a\nb\n");
    let lcov = LcovCoverage::parse(&format!(
        "SF:/a/other/Foo.java\nDA:1,99\nend_of_record\nSF:{}\nDA:2,1\nend_of_record\n",
        temp.path().join("Foo.java").display()
    ))
    .unwrap();

    let loader = SourceLoader::new(
        SourceLocator::directory(temp.path()),
        SourceEncoding::Utf8,
        &lcov,
    );
    let source = loader.load("Foo.java").unwrap().unwrap();
    assert_eq!(source.coverage(), &[None, Some(1), None]);

    let loader = SourceLoader::new(
        SourceLocator::scan([temp.path()]),
        SourceEncoding::Utf8,
        &lcov,
    );
    let source = loader.load("Foo.java").unwrap().unwrap();
    assert_eq!(source.coverage(), &[None, Some(1), None]);
}

#[test]
fn test_lcov_ambiguous_name_without_match_gets_no_hits() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", "a\nb\n");
    let lcov = LcovCoverage::parse(
        "SF:/a/one/Foo.java\nDA:1,99\nend_of_record\nSF:/b/two/Foo.java\nDA:2,7\nend_of_record\n",
    )
    .unwrap();

    let loader = SourceLoader::new(
        SourceLocator::directory(temp.path()),
        SourceEncoding::Utf8,
        &lcov,
    );
    let source = loader.load("Foo.java").unwrap().unwrap();
    assert_eq!(source.coverage(), &[None, None, None]);
}

#[test]
fn test_lcov_negative_count_is_not_summed_away() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", "a\nb\n");
    let lcov = LcovCoverage::parse("SF:Foo.java\nDA:1,-1\nDA:1,1\nend_of_record\n").unwrap();

    let loader = SourceLoader::new(
        SourceLocator::directory(temp.path()),
        SourceEncoding::Utf8,
        &lcov,
    );
    assert!(matches!(
        loader.load("Foo.java").unwrap_err(),
        SourceError::InvalidCoverageData { line: 1, hits: -1 }
    ));
}

#[cfg(unix)]
#[test]
fn test_directory_file_used_as_directory_is_read_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Foo.java", FOO);

    let err = directory_loader(temp.path()).load("Foo.java/Inner.java").unwrap_err();
    assert!(matches!(err, SourceError::FileRead { .. }));
}

#[test]
fn test_multiple_directory_roots_fall_back() {
    let main = TempDir::new().unwrap();
    let generated = TempDir::new().unwrap();
    write(generated.path(), "Gen.java", "class Gen {}");

    let config = LoaderConfig::new()
        .with_source_directory(main.path())
        .with_source_directory(generated.path())
        .with_encoding("UTF-8");
    let loader = config.build_loader(LineHits::new()).unwrap();

    let source = loader.load("Gen.java").unwrap().unwrap();
    assert_eq!(source.name(), "Gen.java");
    assert_eq!(source.line_count(), 1);
}

#[test]
fn test_loader_is_shareable_across_threads() {
    let temp = TempDir::new().unwrap();
    for i in 0..8 {
        write(temp.path(), &format!("F{i}.java"), FOO);
    }
    let loader = directory_loader(temp.path());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let loader = &loader;
                scope.spawn(move || loader.load(&format!("F{i}.java")).unwrap().unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().digest(), FOO_DIGEST);
        }
    });
}
