use lablens_types::Record;
use serde::Serialize;
use std::path::Path;

use crate::Result;

/// A file format records can be loaded from
///
/// Responsibilities:
/// - Recognise files it can read
/// - Decode rows and apply the cleaning rules in [`crate::clean`]
/// - Report rows it had to drop instead of failing the whole load
pub trait RecordSource: Send + Sync {
    /// Unique source ID (e.g., "csv", "json")
    fn id(&self) -> &'static str;

    /// Check if a file belongs to this source
    fn probe(&self, path: &Path) -> bool;

    /// Read every record from the file
    fn load(&self, path: &Path, options: &LoadOptions) -> Result<LoadReport>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Drop rows whose age is missing or zero instead of keeping a null age
    pub drop_missing_age: bool,
}

/// A row that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line (CSV) or array index (JSON)
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.records.len()
    }
}
