//! Sample laboratory results shared by the runtime and CLI tests.
//!
//! The same twelve rows ship as CSV (day-first dates, `0`/blank ages) and as
//! JSON (already clean), so both loader paths can be checked against one
//! expected record list.

use anyhow::Result;
use lablens_types::Record;
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_CSV: &str = "lab_results.csv";
pub const SAMPLE_JSON: &str = "lab_results.json";

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Samples live in `crates/lablens-testing/samples/`.
    pub fn new() -> Self {
        let samples_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}

/// The sample rows after cleaning
pub fn sample_records() -> Vec<Record> {
    let content = include_str!("../samples/lab_results.json");
    match serde_json::from_str(content) {
        Ok(records) => records,
        Err(err) => panic!("bundled sample is not valid record JSON: {}", err),
    }
}
