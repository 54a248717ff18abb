//! Diff engine for rowdiff.
//!
//! Compares two record sets keyed by one or more index columns and produces
//! a [`Diff`]: the rows added, the rows removed, and the field-level changes
//! of rows present in both. The diff doubles as a patch document that can be
//! saved, loaded, and re-applied by `rowdiff-patch`.
//!
//! # Key Types
//!
//! - [`Diff`] / [`RowChange`] / [`FieldDelta`] -- The patch data model
//! - [`DiffOptions`] / [`Comparison`] -- Engine input and output (diff plus match weights)
//! - [`DiffSummary`] -- Human-readable row counts relative to the original size

pub mod codec;
pub mod diff;
pub mod engine;
pub mod error;
pub mod significance;
pub mod summary;
pub mod weight;

pub use codec::{load, load_str, save, to_string};
pub use diff::{Diff, FieldDelta, RowChange};
pub use engine::{create, diff_records, Comparison, DiffOptions};
pub use error::{DiffError, DiffResult};
pub use significance::{filter_significance, parse_numeric, round_significant};
pub use summary::DiffSummary;
pub use weight::{field_weight, PERFECT_MATCH};
