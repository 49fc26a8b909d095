//! Error types for the session history engine.
//!
//! Each stage has its own error enum so callers can tell a bad command line
//! (`TimeSpecError`, `FormatError`) from a bad row (`RecordError`, skipped
//! and reported) from a broken source (`StoreError`, terminal).

use std::io;
use std::path::PathBuf;

/// A `--since`/`--until`/`--present` value matched none of the accepted forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeSpecError {
    #[error("Invalid time value '{0}'")]
    Invalid(String),
}

/// A `--time-format` name is not one of `notime|short|full|iso|compact|raw`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid time format '{0}'")]
    UnknownStyle(String),
}

/// A single record carried a numeric field that is not an unsigned integer.
///
/// The record is skipped; the rest of the pass continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Record {id}: invalid numeric time entry for 'login': '{value}'")]
    InvalidLogin { id: i64, value: String },

    #[error("Record {id}: invalid numeric time entry for 'logout': '{value}'")]
    InvalidLogout { id: i64, value: String },
}

/// The record source could not deliver its records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse record on line {line} of {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("No boot record found in {0}")]
    NoBootRecord(String),
}

/// Terminal failure of a whole query.
///
/// Output written before the failure is not retracted.
#[derive(Debug, thiserror::Error)]
pub enum LastError {
    #[error("Couldn't read all wtmp entries: {0}")]
    Source(#[from] StoreError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}
