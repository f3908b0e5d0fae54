use std::path::{Path, PathBuf};
use std::sync::Arc;

use lablens_loader::{LoadOptions, SkippedRow};
use lablens_types::Record;

use crate::{Error, Result};

/// Immutable snapshot of loaded records.
///
/// Cloning is cheap; every clone shares the same record slice, so readers
/// on other threads never observe a partially loaded dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
    source: Option<PathBuf>,
    skipped: Arc<[SkippedRow]>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            source: None,
            skipped: Arc::new([]),
        }
    }

    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        let report = lablens_loader::load(path, options)?;
        if !report.skipped.is_empty() {
            tracing::warn!(
                path = %path.display(),
                skipped = report.skipped.len(),
                "some rows could not be loaded"
            );
        }

        Ok(Self {
            records: report.records.into(),
            source: Some(path.to_path_buf()),
            skipped: report.skipped.into(),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Records, or `DataUnavailable` when nothing is loaded
    pub fn require(&self) -> Result<&[Record]> {
        if self.records.is_empty() {
            let detail = match &self.source {
                Some(path) => format!("no records loaded from {}", path.display()),
                None => "no dataset loaded; pass --data or set data_path in config.toml".to_string(),
            };
            return Err(Error::DataUnavailable(detail));
        }
        Ok(&self.records)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lablens_testing::fixtures::sample_records;

    #[test]
    fn test_empty_dataset_is_unavailable() {
        let dataset = Dataset::empty();
        assert!(matches!(dataset.require(), Err(Error::DataUnavailable(_))));
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = Dataset::from_records(sample_records());
        let clone = dataset.clone();

        assert!(std::ptr::eq(dataset.records(), clone.records()));
        assert_eq!(clone.require().unwrap().len(), dataset.len());
    }
}
