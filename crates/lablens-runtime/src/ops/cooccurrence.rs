use lablens_engine::{aggregate, aggregate_sharded, filter, matrix::truncate_axis, top_pairs};
use lablens_types::{CoOccurrencePair, CohortFilter, EntityField, Matrix, Record, SessionKey};

use super::PARALLEL_THRESHOLD;

/// Every pair of `entity` values seen in the same subject-day, most frequent first
pub fn all_pairs(
    records: &[Record],
    entity: EntityField,
    cohort: Option<&CohortFilter>,
) -> Vec<CoOccurrencePair> {
    let members: Vec<Record>;
    let records = match cohort {
        Some(cohort) => {
            members = records
                .iter()
                .filter(|r| filter::matches(r, cohort))
                .cloned()
                .collect();
            &members[..]
        }
        None => records,
    };

    if records.len() >= PARALLEL_THRESHOLD {
        aggregate_sharded(
            records,
            SessionKey::SubjectDay,
            entity,
            rayon::current_num_threads(),
        )
    } else {
        aggregate(records, SessionKey::SubjectDay, entity)
    }
}

/// The `limit` most frequent pairs
pub fn pairs(
    records: &[Record],
    entity: EntityField,
    cohort: Option<&CohortFilter>,
    limit: usize,
) -> Vec<CoOccurrencePair> {
    top_pairs(&all_pairs(records, entity, cohort), limit)
}

/// Co-occurrence matrix, optionally cut to the `top` busiest entities
pub fn matrix(
    records: &[Record],
    entity: EntityField,
    cohort: Option<&CohortFilter>,
    top: Option<usize>,
) -> Matrix {
    let matrix = lablens_engine::build_matrix(&all_pairs(records, entity, cohort));
    match top {
        Some(top) => truncate_axis(matrix, top),
        None => matrix,
    }
}
