//! Patch document codec.
//!
//! A diff is saved as one JSON object with keys `_index`, `added`, `removed`
//! and `changed`, in that order. Compact output has no insignificant
//! whitespace; pretty output is indented for review and ends in a newline.

use std::io::{Read, Write};

use crate::diff::Diff;
use crate::error::{DiffError, DiffResult};

/// Write `diff` to `writer`.
pub fn save<W: Write>(diff: &Diff, mut writer: W, compact: bool) -> DiffResult<()> {
    let written = if compact {
        serde_json::to_writer(&mut writer, diff)
    } else {
        serde_json::to_writer_pretty(&mut writer, diff)
    };
    written.map_err(|e| DiffError::Serialization(e.to_string()))?;

    if !compact {
        writer
            .write_all(b"\n")
            .map_err(|e| DiffError::Serialization(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DiffError::Serialization(e.to_string()))
}

/// Render `diff` as a string.
pub fn to_string(diff: &Diff, compact: bool) -> DiffResult<String> {
    let mut buf = Vec::new();
    save(diff, &mut buf, compact)?;
    String::from_utf8(buf).map_err(|e| DiffError::Serialization(e.to_string()))
}

/// Read a patch document from `reader`.
///
/// Missing or malformed keys, and documents that break the diff invariants,
/// fail with [`DiffError::InvalidPatch`].
pub fn load<R: Read>(reader: R) -> DiffResult<Diff> {
    let diff: Diff =
        serde_json::from_reader(reader).map_err(|e| DiffError::InvalidPatch(e.to_string()))?;
    diff.validate()?;
    Ok(diff)
}

/// Parse a patch document from a string.
pub fn load_str(text: &str) -> DiffResult<Diff> {
    load(text.as_bytes())
}
