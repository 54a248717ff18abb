//! Rank many candidate files by similarity to one reference file.
//!
//! Each candidate is compared on its own, with its own match weights, so
//! the order of candidates never affects a score.

use std::fs;
use std::path::{Path, PathBuf};

use rowdiff_similarity::{score_comparison, top_k, Ranked, SimilarityError};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::compare::compare;
use crate::error::{SdkError, SdkResult};
use crate::files::load_records;
use crate::options::CompareOptions;

/// Outcome of ranking a batch of candidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankReport {
    /// Best candidates, highest score first.
    pub ranked: Vec<Ranked<PathBuf>>,
    /// Candidates that share no comparable data with the reference, with
    /// the reason.
    pub unscorable: Vec<(PathBuf, String)>,
}

/// Expand `paths` into candidate files.
///
/// Files are taken as given. Directories are walked recursively for files
/// with a `csv` extension, in name order.
pub fn collect_candidates(paths: &[PathBuf]) -> SdkResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|source| SdkError::Scan {
                path: path.clone(),
                source,
            })?;
            if entry.file_type().is_file() && is_csv(entry.path()) {
                out.push(entry.into_path());
            }
        }
    }
    Ok(out)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Compare `reference` against every candidate and keep the `k` best.
///
/// The reference itself is skipped if it appears among the candidates,
/// under any spelling of its path.
/// Malformed inputs abort the batch; candidates without any match weight
/// or with no rows are reported as unscorable.
pub fn rank_candidates(
    reference: &Path,
    candidates: &[PathBuf],
    options: &CompareOptions,
    k: usize,
) -> SdkResult<RankReport> {
    options.validate()?;
    let from = load_records(reference, options.separator)?;
    let reference_path = fs::canonicalize(reference).map_err(|source| SdkError::Open {
        path: reference.to_path_buf(),
        source,
    })?;
    let is_reference = |candidate: &Path| {
        fs::canonicalize(candidate)
            .map(|path| path == reference_path)
            .unwrap_or(false)
    };

    let mut scored = Vec::new();
    let mut unscorable = Vec::new();
    for candidate in candidates.iter().filter(|c| !is_reference(c.as_path())) {
        let to = load_records(candidate, options.separator)?;
        let comparison = compare(&from, &to, options)?;
        match score_comparison(&comparison, from.len(), to.len()) {
            Ok(score) => {
                debug!(candidate = %candidate.display(), score, "candidate scored");
                scored.push(Ranked {
                    candidate: candidate.clone(),
                    score,
                });
            }
            Err(SimilarityError::InsufficientData(reason)) => {
                debug!(candidate = %candidate.display(), %reason, "candidate unscorable");
                unscorable.push((candidate.clone(), reason));
            }
        }
    }

    info!(
        reference = %reference.display(),
        scored = scored.len(),
        unscorable = unscorable.len(),
        "ranking complete"
    );
    Ok(RankReport {
        ranked: top_k(scored, k),
        unscorable,
    })
}
