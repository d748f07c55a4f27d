use crate::errors::{MergeError, WriteError};
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io;
use std::path::Path;

/// A Ledger is the merged, sorted and cleaned set of rows for one account
/// schema, ready to be written out as CSV.
#[derive(Debug, PartialEq)]
pub struct Ledger<T> {
    rows: Vec<T>,
}

impl<T: Serialize> Ledger<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the header and every row to `writer`.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), WriteError> {
        let mut wtr = csv::Writer::from_writer(writer);

        for row in &self.rows {
            wtr.serialize(row)?;
        }

        // Flushing also flushes the underlying writer, so a failed write
        // surfaces here rather than being lost on drop.
        wtr.flush()?;
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the ledger to it.
    /// A failure part way leaves an incomplete file behind.
    pub fn write_to_path(&self, path: &Path) -> Result<(), WriteError> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Attempts to render the ledger as a CSV string.
    pub fn to_csv_string(&self) -> Result<String, WriteError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;

        // Return the string contents of our buffer, bubbling up any UTF-8
        // encoding errors we encounter.
        Ok(String::from_utf8(buf)?)
    }
}

/// Parses a numeric cell. Missing cells are `None`; anything else that is not
/// a float is an error for the whole group.
pub(crate) fn parse_number(column: &str, cell: Option<&str>) -> Result<Option<f64>, MergeError> {
    match cell {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| MergeError::InvalidNumber {
                column: column.to_string(),
                value: value.to_string(),
            }),
    }
}

/// Folds a multi-line description onto one line.
pub(crate) fn single_line(description: &str) -> String {
    description.replace('\n', " ")
}

fn format_amount(value: f64) -> String {
    // -0.0 would otherwise render as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

pub(crate) fn serialize_amount<S: Serializer>(
    value: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_amount(*value))
}

pub(crate) fn serialize_optional_amount<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_str(&format_amount(*value)),
        None => serializer.serialize_str(""),
    }
}
