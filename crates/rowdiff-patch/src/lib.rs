//! Patch applier for rowdiff.
//!
//! Replays a [`rowdiff_diff::Diff`] on top of the record set it was computed
//! from. Strict mode proves the source has not drifted since the diff was
//! made; lenient mode applies what it can.

pub mod apply;
pub mod columns;
pub mod error;

pub use apply::{apply, keyed, ApplyMode};
pub use columns::output_columns;
pub use error::{PatchError, PatchResult};
