//! Record sources.
//!
//! A [`RecordSource`] hands out its records newest first. The reconstructor
//! relies on that order and does not check it.

use std::cmp::Reverse;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::record::{RawRecord, RecordKind};

/// Records in non-increasing login order.
pub type RecordStream<'a> = Box<dyn Iterator<Item = Result<RawRecord, StoreError>> + 'a>;

/// Something that can deliver login history.
pub trait RecordSource {
    /// Display name used in the trailer (`<name> begins ...`).
    fn name(&self) -> String;

    /// All records, most recent login first.
    ///
    /// With `unique` set, only the most recent record of each user is
    /// delivered. Implementations must keep the non-increasing login order;
    /// consumers do not re-sort.
    fn records(&self, unique: bool) -> Result<RecordStream<'_>, StoreError>;
}

/// A JSON-lines file, one record per line.
///
/// Lines may be in any order; records are served sorted by login, newest
/// first.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<RawRecord>, StoreError> {
        let file = File::open(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::Open {
                    path: self.path.clone(),
                    source,
                }
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            // Invalid UTF-8 surfaces here as InvalidData
            let line = line.map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }
}

impl RecordSource for JsonlStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn records(&self, unique: bool) -> Result<RecordStream<'_>, StoreError> {
        let mut records = self.load()?;
        // Later lines win ties; rows without a valid login sink to the end.
        records.reverse();
        records.sort_by_key(|record| Reverse(record.login.as_usec()));
        if unique {
            records = collapse(records);
        }
        Ok(Box::new(records.into_iter().map(Ok)))
    }
}

/// A fixed list of records, already newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: String,
    records: Vec<RawRecord>,
}

impl MemoryStore {
    pub fn new(name: &str, records: Vec<RawRecord>) -> Self {
        Self {
            name: name.to_string(),
            records,
        }
    }
}

impl RecordSource for MemoryStore {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn records(&self, unique: bool) -> Result<RecordStream<'_>, StoreError> {
        if unique {
            Ok(Box::new(collapse(self.records.clone()).into_iter().map(Ok)))
        } else {
            Ok(Box::new(self.records.iter().cloned().map(Ok)))
        }
    }
}

/// Keep the first (most recent) record of each user, preserving order.
fn collapse(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.user.clone()))
        .collect()
}

/// Login instant of the most recent boot in `source`.
pub fn boot_time(source: &dyn RecordSource) -> Result<u64, StoreError> {
    for item in source.records(false)? {
        let record = item?;
        if record.kind != RecordKind::BootMarker {
            continue;
        }
        if let Some(login) = record.login.as_usec() {
            return Ok(login);
        }
    }
    Err(StoreError::NoBootRecord(source.name()))
}
