use lablens_engine::{stats, DatasetSummary, TestDistribution};
use lablens_types::Record;

use crate::{Error, Result};

pub type TestStats = TestDistribution;

pub fn summary(records: &[Record]) -> DatasetSummary {
    stats::summarize(records)
}

/// Result distribution for one test name (exact match)
pub fn test_stats(records: &[Record], test: &str) -> Result<TestStats> {
    stats::test_distribution(records, test)
        .ok_or_else(|| Error::NotFound(format!("test '{}' does not appear in the dataset", test)))
}
