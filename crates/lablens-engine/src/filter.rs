use lablens_types::{CohortFilter, Logic, Record};

use crate::predicate;

/// Combine a filter's conditions for one record.
///
/// The result does not depend on condition order.
pub fn matches(record: &Record, filter: &CohortFilter) -> bool {
    let mut outcomes = filter
        .conditions()
        .iter()
        .map(|condition| predicate::evaluate(record, condition));

    match filter.logic() {
        Logic::And => outcomes.all(|hit| hit),
        Logic::Or => outcomes.any(|hit| hit),
    }
}
