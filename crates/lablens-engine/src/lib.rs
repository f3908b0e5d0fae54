// Engine module - cohort filtering and co-occurrence analysis
// This layer sits between loaded records (types) and the runtime/CLI layers.
// Everything here is a pure function over an immutable record slice.

pub mod cooccurrence;
pub mod filter;
pub mod matrix;
pub mod panels;
pub mod predicate;
pub mod stats;
pub mod subset;

pub use cooccurrence::{aggregate, aggregate_sharded, top_pairs};
pub use panels::{Panel, Repeat};
pub use stats::{
    CohortStats, ColumnStats, DatasetSummary, NumericSummary, TestDistribution, ValueCount,
};
pub use subset::{Page, PageResult, Sort, SortOrder, SubsetResult};

use lablens_types::{CoOccurrencePair, CohortFilter, EntityField, Matrix, Record, SessionKey};

// Façade API - Stable public interface for runtime and CLI layers

/// Filter records, keeping at most `limit` matches and the full match count
pub fn run_subset(records: &[Record], filter: &CohortFilter, limit: usize) -> SubsetResult {
    subset::run(records, filter, limit)
}

/// Pairwise frequencies of tests ordered for the same subject on the same day
pub fn test_pairs(records: &[Record]) -> Vec<CoOccurrencePair> {
    aggregate(records, SessionKey::SubjectDay, EntityField::TestName)
}

/// Pairwise frequencies of service units seen for the same subject on the same day
pub fn service_pairs(records: &[Record]) -> Vec<CoOccurrencePair> {
    aggregate(records, SessionKey::SubjectDay, EntityField::ServiceUnit)
}

/// Symmetric, axis-ordered matrix from pairwise frequencies
pub fn build_matrix(pairs: &[CoOccurrencePair]) -> Matrix {
    matrix::build(pairs)
}
