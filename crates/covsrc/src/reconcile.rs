//! Alignment of line hit counts to logical lines.

use crate::coverage::CoverageMap;
use crate::result::{SourceError, SourceResult};
use tracing::debug;

/// Build the per-line coverage array for a file with `line_count` logical lines.
///
/// Line `n` of the file lands at index `n - 1`. Lines missing from `hits` are
/// `None`. Keys outside `1..=line_count` are dropped.
///
/// # Errors
///
/// Returns [`SourceError::InvalidCoverageData`] if an in-range line has a
/// negative hit count.
pub fn reconcile(line_count: usize, hits: &CoverageMap) -> SourceResult<Vec<Option<u64>>> {
    let mut coverage = vec![None; line_count];
    let mut ignored = 0usize;

    for (&line, &count) in hits {
        let index = line as usize;
        if index == 0 || index > line_count {
            ignored += 1;
            continue;
        }
        let count = u64::try_from(count)
            .map_err(|_| SourceError::InvalidCoverageData { line, hits: count })?;
        coverage[index - 1] = Some(count);
    }

    if ignored > 0 {
        debug!(ignored, line_count, "dropped coverage entries outside the file");
    }

    Ok(coverage)
}
