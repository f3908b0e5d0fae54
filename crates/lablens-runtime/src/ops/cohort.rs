use lablens_engine::subset::{self, Page, Sort};
use lablens_engine::{filter, CohortStats};
use lablens_types::{CohortFilter, QueryResponse, Record, SubsetResponse};

use super::PARALLEL_THRESHOLD;

/// Paging and ordering requested by a caller; no limit means the configured default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    pub offset: usize,
    pub sort: Sort,
}

/// Matching records in dataset order, at most `limit`
pub fn subset(records: &[Record], filter: &CohortFilter, limit: usize) -> SubsetResponse {
    let result = if records.len() >= PARALLEL_THRESHOLD {
        subset::run_parallel(records, filter, limit)
    } else {
        subset::run(records, filter, limit)
    };

    tracing::debug!(
        filter = %filter,
        matched = result.total_count,
        returned = result.matches.len(),
        "subset"
    );

    SubsetResponse {
        rowcount: result.total_count,
        records: result.matches,
    }
}

/// One sorted page of matches plus dataset and match totals
pub fn query_page(records: &[Record], filter: &CohortFilter, page: &Page) -> QueryResponse {
    let result = subset::run_page(records, filter, page);

    QueryResponse {
        data: result.records,
        total: records.len(),
        filtered: result.filtered,
    }
}

/// Column statistics for the cohort, or the whole dataset without a filter
pub fn cohort_stats(records: &[Record], cohort: Option<&CohortFilter>) -> CohortStats {
    match cohort {
        Some(cohort) => {
            let members: Vec<Record> = records
                .iter()
                .filter(|r| filter::matches(r, cohort))
                .cloned()
                .collect();
            lablens_engine::stats::column_stats(&members)
        }
        None => lablens_engine::stats::column_stats(records),
    }
}
