use std::fmt;

use crate::diff::Diff;

/// Row counts of a diff relative to the size of the original record set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub original_rows: usize,
    pub removed: usize,
    pub added: usize,
    pub changed: usize,
}

impl DiffSummary {
    pub fn new(diff: &Diff, original_rows: usize) -> Self {
        Self {
            original_rows,
            removed: diff.removed.len(),
            added: diff.added.len(),
            changed: diff.changed.len(),
        }
    }

    pub fn is_identical(&self) -> bool {
        self.removed == 0 && self.added == 0 && self.changed == 0
    }

    /// Percentage of the original row count. An empty original counts as one
    /// row.
    pub fn percent(&self, rows: usize) -> f64 {
        100.0 * rows as f64 / self.original_rows.max(1) as f64
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identical() {
            return writeln!(f, "files are identical");
        }
        writeln!(f, "{} rows removed ({:.1}%)", self.removed, self.percent(self.removed))?;
        writeln!(f, "{} rows added ({:.1}%)", self.added, self.percent(self.added))?;
        writeln!(f, "{} rows changed ({:.1}%)", self.changed, self.percent(self.changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowdiff_records::Record;

    fn row(id: &str) -> Record {
        [("id".to_string(), id.to_string())].into()
    }

    #[test]
    fn identical() {
        let summary = DiffSummary::new(&Diff::new(vec!["id".into()]), 10);
        assert!(summary.is_identical());
        assert_eq!(summary.to_string(), "files are identical\n");
    }

    #[test]
    fn percentages() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.removed.push(row("1"));
        diff.added.push(row("2"));
        diff.added.push(row("3"));
        let summary = DiffSummary::new(&diff, 8);
        assert_eq!(
            summary.to_string(),
            "1 rows removed (12.5%)\n2 rows added (25.0%)\n0 rows changed (0.0%)\n"
        );
    }

    #[test]
    fn empty_original_counts_as_one() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.added.push(row("1"));
        let summary = DiffSummary::new(&diff, 0);
        assert_eq!(summary.percent(summary.added), 100.0);
    }
}
