//! Report command handler

use crate::commands::ReportArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use covsrc::{LcovCoverage, LoaderConfig, SourceReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Execute the report command
pub fn execute_report(config: &CliConfig, args: &ReportArgs) -> CliResult<()> {
    let loader_config = build_loader_config(args)?;
    let mut lcov = LcovCoverage::load(&args.lcov)?;
    info!(files = lcov.len(), lcov = %args.lcov.display(), "loaded tracefile");

    let mut unmapped = Vec::new();
    let names: Vec<String> = if args.files.is_empty() {
        // paths under a source directory claim their names before bare file names
        let direct_config = loader_config.clone().with_scan(false);
        let (direct, by_file_name): (Vec<String>, Vec<String>) = lcov
            .files()
            .map(str::to_string)
            .partition(|file| request_name(file, &direct_config).is_some());

        let mut names = Vec::new();
        for file in direct.into_iter().chain(by_file_name) {
            let Some(name) = request_name(&file, &loader_config) else {
                warn!(file = %file, "tracefile path is outside every source directory");
                unmapped.push(file);
                continue;
            };
            if !lcov.alias(name.clone(), &file) {
                warn!(
                    file = %file,
                    name = %name,
                    other = lcov.aliased(&name).unwrap_or_default(),
                    "tracefile paths collide on one source name, skipping"
                );
                unmapped.push(file);
                continue;
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    } else {
        args.files.clone()
    };

    let loader = loader_config.build_loader(&lcov)?;
    let mut report = SourceReport::collect(&loader, &names)?;
    report.skipped.extend(unmapped);

    if let Some(ref output) = args.output {
        report.save(output)?;
        if !config.verbosity.is_quiet() {
            eprintln!("Report written to: {}", output.display());
        }
    } else {
        let json = report
            .to_json()
            .map_err(|e| CliError::report_generation(e.to_string()))?;
        println!("{json}");
    }

    if !config.verbosity.is_quiet() {
        eprintln!(
            "Sources: {} loaded, {} skipped | Lines: {} relevant, {} covered",
            report.source_files.len(),
            report.skipped.len(),
            report.lines_found(),
            report.lines_hit()
        );
    }

    Ok(())
}

/// Merge the optional YAML config with command-line overrides
pub fn build_loader_config(args: &ReportArgs) -> CliResult<LoaderConfig> {
    let mut config = match args.config {
        Some(ref path) => LoaderConfig::load(path)?,
        None => LoaderConfig::new(),
    };

    config
        .source_directories
        .extend(args.source_dirs.iter().cloned());
    if args.scan {
        config.scan_for_sources = true;
    }
    if let Some(ref encoding) = args.encoding {
        config.source_encoding = Some(encoding.clone());
    }

    if config.source_directories.is_empty() {
        config.source_directories.push(PathBuf::from("."));
    }
    if config.source_encoding.is_none() {
        return Err(CliError::config(
            "source encoding must be set (use --encoding or source_encoding in the config)",
        ));
    }

    Ok(config)
}

/// Turn a tracefile path into the name requested from the loader
///
/// Paths under a source directory are made relative to the first one containing
/// them. Other relative paths are used as-is. Other absolute paths only map when
/// scanning, by bare file name.
#[must_use]
pub fn request_name(file: &str, config: &LoaderConfig) -> Option<String> {
    let path = Path::new(file);
    if path.is_relative() {
        let name = config
            .source_directories
            .iter()
            .filter(|dir| dir.is_relative())
            .find_map(|dir| path.strip_prefix(dir).ok())
            .filter(|relative| !relative.as_os_str().is_empty())
            .map_or_else(|| file.to_string(), |r| r.to_string_lossy().into_owned());
        return Some(name);
    }

    for dir in &config.source_directories {
        let candidates = [Some(dir.clone()), std::fs::canonicalize(dir).ok()];
        for root in candidates.into_iter().flatten() {
            if let Ok(relative) = path.strip_prefix(&root) {
                return Some(relative.to_string_lossy().into_owned());
            }
        }
    }

    if config.scan_for_sources {
        return path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
    }

    None
}
