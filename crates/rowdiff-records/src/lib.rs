//! Record sets for rowdiff.
//!
//! This crate provides the tabular foundation every other rowdiff crate
//! builds on: records keyed by column name, composite index keys, and
//! record sets loaded from (and written back to) delimited text.
//!
//! # Key Types
//!
//! - [`Record`] -- One row, column name to raw field value
//! - [`RecordKey`] -- Composite index key built from the index columns
//! - [`RecordSet`] -- Header plus ordered records
//! - [`Side`] -- Which input of a comparison a record came from

pub mod error;
pub mod record;
pub mod set;

pub use error::{RecordError, RecordResult};
pub use record::{Record, RecordKey, Side};
pub use set::{RecordSet, DEFAULT_SEPARATOR};
