use std::num::NonZeroU32;

use rowdiff_diff::DiffOptions;
use rowdiff_records::DEFAULT_SEPARATOR;

use crate::error::{SdkError, SdkResult};

/// Everything needed to compare two delimited inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareOptions {
    pub index: Vec<String>,
    pub ignore: Vec<String>,
    pub separator: u8,
    /// Drop numeric changes that vanish at this many significant figures.
    pub significance: Option<NonZeroU32>,
}

impl CompareOptions {
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            ignore: Vec::new(),
            separator: DEFAULT_SEPARATOR,
            significance: None,
        }
    }

    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_significance(mut self, significance: Option<NonZeroU32>) -> Self {
        self.significance = significance;
        self
    }

    /// Reject option combinations the diff engine does not accept.
    pub fn validate(&self) -> SdkResult<()> {
        if self.index.is_empty() {
            return Err(SdkError::InvalidOptions("no index columns given".into()));
        }
        if let Some(column) = self.ignore.iter().find(|c| self.index.contains(*c)) {
            return Err(SdkError::InvalidOptions(format!(
                "cannot ignore index column {column:?}"
            )));
        }
        Ok(())
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::new(self.index.clone()).with_ignore(self.ignore.clone())
    }
}
