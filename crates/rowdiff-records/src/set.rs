//! Record sets and their delimited-text representation.
//!
//! A [`RecordSet`] is a header plus an ordered list of records. Loading
//! reads the first line as the header and every following line as one
//! record; writing emits the records in a caller-chosen column order.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::{Read, Write};

use tracing::debug;

use crate::error::{RecordError, RecordResult};
use crate::record::{Record, RecordKey, Side};

/// Field separator used when none is given.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// An ordered sequence of records sharing one header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Declared field names, in input order.
    pub header: Vec<String>,
    /// Records in input order.
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(header: Vec<String>, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    /// Parse a delimited stream.
    ///
    /// The reader is consumed but not closed; pass `&mut reader` to keep
    /// ownership. Blank lines are skipped. A data row whose field count
    /// differs from the header fails with [`RecordError::MalformedInput`];
    /// a header repeating a column name fails with
    /// [`RecordError::DuplicateColumn`].
    pub fn read<R: Read>(reader: R, separator: u8) -> RecordResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if let Some(column) = first_repeated(&header) {
            return Err(RecordError::DuplicateColumn {
                column: column.clone(),
            });
        }

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            if row.len() != header.len() {
                return Err(RecordError::MalformedInput {
                    line: row.position().map(|p| p.line()).unwrap_or(0),
                    expected: header.len(),
                    found: row.len(),
                });
            }
            let record: Record = header
                .iter()
                .cloned()
                .zip(row.iter().map(|v| v.to_string()))
                .collect();
            records.push(record);
        }

        debug!(columns = header.len(), rows = records.len(), "record set loaded");
        Ok(Self { header, records })
    }

    /// Write the records as delimited text, header first.
    ///
    /// Columns follow `fieldnames`; a record lacking a column writes an
    /// empty field.
    pub fn write<W: Write>(&self, writer: W, separator: u8, fieldnames: &[String]) -> RecordResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(separator)
            .from_writer(writer);

        if !fieldnames.is_empty() {
            csv_writer.write_record(fieldnames)?;
        }
        for record in &self.records {
            csv_writer.write_record(
                fieldnames
                    .iter()
                    .map(|f| record.get(f).map(String::as_str).unwrap_or("")),
            )?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Check that every column in `columns` appears in the header.
    ///
    /// A set with no header at all (empty input) has nothing to check.
    pub fn require_columns(&self, columns: &[String], side: Side) -> RecordResult<()> {
        if self.header.is_empty() {
            return Ok(());
        }
        match columns.iter().find(|c| !self.header.contains(*c)) {
            Some(column) => Err(RecordError::UnknownColumn {
                side,
                column: column.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Map each index key to the position of its record.
    ///
    /// A repeated key aborts with [`RecordError::DuplicateKey`]; nothing is
    /// ever silently overwritten.
    pub fn positions(&self, index: &[String], side: Side) -> RecordResult<BTreeMap<RecordKey, usize>> {
        let mut map = BTreeMap::new();
        for (position, record) in self.records.iter().enumerate() {
            let key = RecordKey::of(record, index).ok_or_else(|| RecordError::UnknownColumn {
                side,
                column: index
                    .iter()
                    .find(|c| !record.contains_key(*c))
                    .cloned()
                    .unwrap_or_default(),
            })?;
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(slot) => {
                    return Err(RecordError::DuplicateKey {
                        side,
                        key: slot.key().clone(),
                    });
                }
            }
        }
        Ok(map)
    }

    /// Build a key to record map over the given index columns.
    ///
    /// Fails like [`RecordSet::positions`] on repeated keys.
    pub fn index_by(&self, index: &[String], side: Side) -> RecordResult<BTreeMap<RecordKey, &Record>> {
        Ok(self
            .positions(index, side)?
            .into_iter()
            .map(|(key, position)| (key, &self.records[position]))
            .collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn first_repeated(header: &[String]) -> Option<&String> {
    let mut seen = std::collections::BTreeSet::new();
    header.iter().find(|column| !seen.insert(column.as_str()))
}
