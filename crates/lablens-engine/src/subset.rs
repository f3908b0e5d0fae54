use std::cmp::Ordering;

use lablens_types::{CohortFilter, Field, FieldValue, Record};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::filter;

/// Bounded filter result.
///
/// `matches` is the prefix (up to the limit) of all matching records in
/// their original order; `total_count` counts every match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetResult {
    pub matches: Vec<Record>,
    pub total_count: usize,
}

impl SubsetResult {
    pub fn is_truncated(&self) -> bool {
        self.matches.len() < self.total_count
    }
}

pub fn run(records: &[Record], filter: &CohortFilter, limit: usize) -> SubsetResult {
    let mut matches = Vec::new();
    let mut total_count = 0;

    for record in records.iter().filter(|r| filter::matches(r, filter)) {
        if total_count < limit {
            matches.push(record.clone());
        }
        total_count += 1;
    }

    SubsetResult {
        matches,
        total_count,
    }
}

/// Same result as [`run`], evaluating records across the rayon pool
pub fn run_parallel(records: &[Record], filter: &CohortFilter, limit: usize) -> SubsetResult {
    let hits: Vec<usize> = records
        .par_iter()
        .enumerate()
        .filter(|(_, record)| filter::matches(record, filter))
        .map(|(idx, _)| idx)
        .collect();

    SubsetResult {
        matches: hits.iter().take(limit).map(|&idx| records[idx].clone()).collect(),
        total_count: hits.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: Field,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: Field::Date,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
    pub sort: Sort,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
            sort: Sort::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub records: Vec<Record>,
    pub filtered: usize,
}

/// Sort all matches, then slice `offset..offset + limit`.
///
/// The sort is stable, so records with equal keys keep their original order.
pub fn run_page(records: &[Record], filter: &CohortFilter, page: &Page) -> PageResult {
    let mut hits: Vec<&Record> = records
        .iter()
        .filter(|r| filter::matches(r, filter))
        .collect();
    let filtered = hits.len();

    hits.sort_by(|a, b| {
        order_values(a.get(page.sort.field), b.get(page.sort.field), page.sort.order)
    });

    PageResult {
        records: hits
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect(),
        filtered,
    }
}

/// Nulls always sort last, whatever the direction
fn order_values(a: FieldValue<'_>, b: FieldValue<'_>, order: SortOrder) -> Ordering {
    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Greater,
        (_, FieldValue::Null) => Ordering::Less,
        _ => {
            let ordering = compare_values(a, b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    }
}

// Mixed result columns: numbers before text
fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        (FieldValue::Number(_), _) => Ordering::Less,
        (_, FieldValue::Number(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}
