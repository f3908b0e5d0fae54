use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use lablens_types::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};

const TOP_VALUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub total_patients: usize,
    pub total_tests: usize,
    pub date_range: Option<[NaiveDate; 2]>,
    pub avg_age: Option<f64>,
    pub missing_age: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    /// Sample standard deviation; absent for a single value
    pub std: Option<f64>,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub missing: usize,
    pub unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_values: Option<Vec<ValueCount>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    pub total_rows: usize,
    pub columns: Vec<ColumnStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDistribution {
    pub test: String,
    pub total: usize,
    pub values: Vec<ValueCount>,
    pub numeric_summary: Option<NumericSummary>,
}

pub fn summarize(records: &[Record]) -> DatasetSummary {
    let patients: BTreeSet<&str> = records.iter().map(|r| r.subject_id.as_str()).collect();
    let tests: BTreeSet<&str> = records.iter().map(|r| r.test_name.as_str()).collect();

    let date_range = records
        .iter()
        .map(|r| r.date)
        .min()
        .zip(records.iter().map(|r| r.date).max())
        .map(|(min, max)| [min, max]);

    let ages: Vec<f64> = records.iter().filter_map(|r| r.age).map(|a| a as f64).collect();
    let avg_age = mean(&ages).map(|m| (m * 100.0).round() / 100.0);

    DatasetSummary {
        total_rows: records.len(),
        total_patients: patients.len(),
        total_tests: tests.len(),
        date_range,
        avg_age,
        missing_age: records.len() - ages.len(),
    }
}

/// Per-column profile of a (filtered) record set
pub fn column_stats(records: &[Record]) -> CohortStats {
    let columns = Field::ALL
        .iter()
        .map(|&field| profile_column(records, field))
        .collect();

    CohortStats {
        total_rows: records.len(),
        columns,
    }
}

fn profile_column(records: &[Record], field: Field) -> ColumnStats {
    let values: Vec<FieldValue<'_>> = records.iter().map(|r| r.get(field)).collect();
    let present: Vec<String> = values
        .iter()
        .filter(|v| !matches!(v, FieldValue::Null))
        .map(|v| v.to_string())
        .collect();
    let unique = present.iter().collect::<BTreeSet<_>>().len();

    let mut stats = ColumnStats {
        column: field.column().to_string(),
        missing: values.len() - present.len(),
        unique,
        numeric: None,
        top_values: None,
    };

    match field {
        Field::Age => {
            let numbers: Vec<f64> = values
                .iter()
                .filter_map(|v| match v {
                    FieldValue::Number(n) => Some(*n),
                    _ => None,
                })
                .collect();
            stats.numeric = numeric_summary(&numbers);
        }
        Field::Date => {}
        _ => {
            let top = value_counts(present.iter().map(String::as_str), Some(TOP_VALUES));
            if !top.is_empty() {
                stats.top_values = Some(top);
            }
        }
    }

    stats
}

/// Result value counts for one test, `None` when the test never appears
pub fn test_distribution(records: &[Record], test: &str) -> Option<TestDistribution> {
    let rows: Vec<&Record> = records.iter().filter(|r| r.test_name == test).collect();
    if rows.is_empty() {
        return None;
    }

    let rendered: Vec<String> = rows.iter().map(|r| r.result_value.to_string()).collect();
    let numbers: Vec<f64> = rows.iter().filter_map(|r| r.result_value.as_number()).collect();

    Some(TestDistribution {
        test: test.to_string(),
        total: rows.len(),
        values: value_counts(rendered.iter().map(String::as_str), None),
        numeric_summary: numeric_summary(&numbers),
    })
}

/// Counts by value, most frequent first, ties by value
fn value_counts<'a>(values: impl Iterator<Item = &'a str>, limit: Option<usize>) -> Vec<ValueCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut sorted: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}

pub fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    let mean = mean(values)?;

    let std = (values.len() > 1).then(|| {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        var.sqrt()
    });

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(NumericSummary {
        mean,
        std,
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        count: values.len(),
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
