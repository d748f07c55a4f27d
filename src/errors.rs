use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// A single date value matched none of the recognized formats.
#[derive(Debug, PartialEq)]
pub struct FormatError {
    value: String,
}

impl FormatError {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// An entire date column contained no value in the baseline `YYYY/MM/DD`
/// format, so there is nothing to seed missing dates with.
#[derive(Debug, PartialEq)]
pub struct NoValidDatesError {
    column: String,
}

impl NoValidDatesError {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum FragmentError {
    ReadError(csv::Error),
}

#[derive(Debug, PartialEq)]
pub enum MergeError {
    NoValidDates(NoValidDatesError),
    InvalidNumber { column: String, value: String },
}

#[derive(Debug)]
pub enum WriteError {
    SerializeError(csv::Error),
    IoError(io::Error),
    EncodingError(FromUtf8Error),
}

#[derive(Debug)]
pub enum PipelineError {
    NoFragments,
    Discovery(walkdir::Error),
    Load { path: PathBuf, source: FragmentError },
    Write { path: PathBuf, source: WriteError },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported date format: {}", self.value)
    }
}

impl fmt::Display for NoValidDatesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no valid dates in column {}", self.column)
    }
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FragmentError::ReadError(err) => write!(f, "failed to read csv fragment: {}", err),
        }
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NoValidDates(err) => write!(f, "unable to merge ledger: {}", err),
            MergeError::InvalidNumber { column, value } => write!(
                f,
                "unable to merge ledger, column {} holds a non-numeric value {:?}",
                column, value
            ),
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::SerializeError(err) => {
                write!(f, "failed to serialize ledger record: {}", err)
            }
            WriteError::IoError(err) => write!(f, "failed to write ledger: {}", err),
            WriteError::EncodingError(err) => write!(f, "failed to encode csv ledger: {}", err),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NoFragments => write!(f, "no csv fragments found"),
            PipelineError::Discovery(err) => {
                write!(f, "failed to discover csv fragments: {}", err)
            }
            PipelineError::Load { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            PipelineError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl From<csv::Error> for FragmentError {
    fn from(err: csv::Error) -> Self {
        FragmentError::ReadError(err)
    }
}

impl From<NoValidDatesError> for MergeError {
    fn from(err: NoValidDatesError) -> Self {
        MergeError::NoValidDates(err)
    }
}

impl From<csv::Error> for WriteError {
    fn from(err: csv::Error) -> Self {
        WriteError::SerializeError(err)
    }
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> Self {
        WriteError::IoError(err)
    }
}

impl From<FromUtf8Error> for WriteError {
    fn from(err: FromUtf8Error) -> Self {
        WriteError::EncodingError(err)
    }
}

impl From<walkdir::Error> for PipelineError {
    fn from(err: walkdir::Error) -> Self {
        PipelineError::Discovery(err)
    }
}

impl Error for FormatError {}
impl Error for NoValidDatesError {}
impl Error for FragmentError {}
impl Error for MergeError {}
impl Error for WriteError {}
impl Error for PipelineError {}
