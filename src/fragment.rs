use crate::errors::FragmentError;
use crate::schema::Schema;
use csv::{StringRecord, Trim};
use std::io;
use std::path::{Path, PathBuf};

/// The contents of one extracted statement CSV, before merging.
///
/// Cells are kept as the text found in the file; an empty cell (or a cell
/// past the end of a short row) is treated as missing. The schema is decided
/// once, when the fragment is loaded.
#[derive(Debug)]
pub struct Fragment {
    source: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
    schema: Schema,
}

impl Fragment {
    /// Reads a fragment from any CSV source. `source` is only used to report
    /// where the rows came from.
    pub fn from_reader<R: io::Read>(source: PathBuf, reader: R) -> Result<Self, FragmentError> {
        let reader = Self::reader_builder().from_reader(reader);
        Self::from_csv(source, reader)
    }

    fn reader_builder() -> csv::ReaderBuilder {
        // Only headers are trimmed, cell values have to reach the mergers
        // exactly as extracted.
        let mut builder = csv::ReaderBuilder::new();
        builder.flexible(true).has_headers(true).trim(Trim::Headers);
        builder
    }

    fn from_csv<R: io::Read>(
        source: PathBuf,
        mut reader: csv::Reader<R>,
    ) -> Result<Self, FragmentError> {
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        let schema = Schema::classify(&headers);

        Ok(Self {
            source,
            headers,
            rows,
            schema,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Position of the first of `names` present in this fragment.
    pub fn first_column_index(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column_index(name))
    }

    /// Required columns of this fragment's schema that it does not carry,
    /// reported by their preferred name.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        self.schema
            .required_columns()
            .iter()
            .filter(|names| self.first_column_index(names).is_none())
            .map(|names| names[0])
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(Record)
    }

    /// Iterates over the cells of column `index`, one per row in file order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.records().map(move |record| record.get(index))
    }
}

/// A borrowed data row of a fragment.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a>(&'a StringRecord);

impl<'a> Record<'a> {
    /// The cell at `index`, or `None` when it is empty or past the end of a
    /// short row.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.0.get(index).filter(|value| !value.is_empty())
    }
}

impl TryFrom<PathBuf> for Fragment {
    type Error = FragmentError;

    /// Loads the CSV file located at the provided PathBuf.
    ///
    /// Note: the csv library sets up an io::BufReader, and reports failures
    /// to open the file as csv errors.
    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let reader = Self::reader_builder().from_path(&path)?;
        Self::from_csv(path, reader)
    }
}
