//! File- and stream-level operations.
//!
//! Files are opened here and closed when the operation returns; streams
//! passed in by the caller are only read or written, never closed.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use rowdiff_diff::{Comparison, Diff, DiffSummary};
use rowdiff_patch::{apply, ApplyMode};
use rowdiff_records::RecordSet;
use rowdiff_similarity::score_comparison;
use tracing::info;

use crate::compare::compare;
use crate::error::{SdkError, SdkResult};
use crate::options::CompareOptions;

/// Load a delimited file.
pub fn load_records(path: &Path, separator: u8) -> SdkResult<RecordSet> {
    let file = File::open(path).map_err(|source| SdkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let set = RecordSet::read(BufReader::new(file), separator)?;
    info!(path = %path.display(), rows = set.len(), "records loaded");
    Ok(set)
}

/// The comparison of two files plus their row counts.
#[derive(Clone, Debug, PartialEq)]
pub struct FileComparison {
    pub comparison: Comparison,
    pub from_rows: usize,
    pub to_rows: usize,
}

impl FileComparison {
    pub fn diff(&self) -> &Diff {
        &self.comparison.diff
    }

    /// Row counts relative to the "from" file.
    pub fn summary(&self) -> DiffSummary {
        DiffSummary::new(&self.comparison.diff, self.from_rows)
    }

    /// Similarity of the two files.
    pub fn similarity(&self) -> SdkResult<f64> {
        Ok(score_comparison(&self.comparison, self.from_rows, self.to_rows)?)
    }
}

/// Diff two delimited files.
pub fn diff_files(from: &Path, to: &Path, options: &CompareOptions) -> SdkResult<FileComparison> {
    options.validate()?;
    let from_set = load_records(from, options.separator)?;
    let to_set = load_records(to, options.separator)?;
    let comparison = compare(&from_set, &to_set, options)?;
    Ok(FileComparison {
        comparison,
        from_rows: from_set.len(),
        to_rows: to_set.len(),
    })
}

/// Read a patch and a source, apply the patch, and write the result.
///
/// Returns the patched record set as written.
pub fn patch_streams<P: Read, S: Read, W: Write>(
    patch: P,
    source: S,
    output: W,
    mode: ApplyMode,
    separator: u8,
) -> SdkResult<RecordSet> {
    let diff = rowdiff_diff::load(patch)?;
    let from = RecordSet::read(source, separator)?;
    let patched = apply(&diff, &from, mode)?;
    patched.write(output, separator, &patched.header)?;
    info!(rows = patched.len(), ?mode, "patch written");
    Ok(patched)
}
