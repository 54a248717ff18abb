use rowdiff_diff::{create, filter_significance, Comparison};
use rowdiff_records::RecordSet;
use tracing::debug;

use crate::error::SdkResult;
use crate::options::CompareOptions;

/// Validate `options`, diff the two sets, and apply significance filtering.
///
/// Match weights are those of the raw comparison; filtering only trims the
/// diff.
pub fn compare(from: &RecordSet, to: &RecordSet, options: &CompareOptions) -> SdkResult<Comparison> {
    options.validate()?;
    let mut comparison = create(from, to, &options.diff_options())?;
    if let Some(figures) = options.significance {
        let before = comparison.diff.changed.len();
        comparison.diff = filter_significance(&comparison.diff, figures);
        debug!(
            figures = figures.get(),
            dropped = before - comparison.diff.changed.len(),
            "significance filter applied"
        );
    }
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use std::num::NonZeroU32;

    fn set(text: &str) -> RecordSet {
        RecordSet::read(text.as_bytes(), b',').unwrap()
    }

    #[test]
    fn significance_suppresses_small_change() {
        let from = set("id,val\n1,10.00\n");
        let to = set("id,val\n1,10.01\n");
        let opts = CompareOptions::new(vec!["id".into()]);

        let raw = compare(&from, &to, &opts).unwrap();
        assert_eq!(raw.diff.changed.len(), 1);

        let filtered = compare(&from, &to, &opts.with_significance(NonZeroU32::new(2))).unwrap();
        assert!(filtered.diff.changed.is_empty());
        assert_eq!(filtered.weights, raw.weights);
    }

    #[test]
    fn invalid_options_checked_first() {
        let a = set("id\n1\n");
        let opts = CompareOptions::new(vec!["id".into()]).with_ignore(vec!["id".into()]);
        assert!(matches!(compare(&a, &a, &opts), Err(SdkError::InvalidOptions(_))));
    }
}
