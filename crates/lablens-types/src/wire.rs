//! Request and response shapes exchanged with callers.
//!
//! Requests keep field/operator/logic as raw strings so that unknown names
//! surface as `ValidationError`s when converted, not as opaque decode errors.

use serde::{Deserialize, Serialize};

use crate::domain::{CoOccurrencePair, CohortFilter, FilterCondition, FilterValue, Logic, Record};
use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRequest {
    #[serde(alias = "column")]
    pub field: String,
    pub operator: String,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub conditions: Vec<ConditionRequest>,
    #[serde(default = "default_logic")]
    pub logic: String,
}

fn default_logic() -> String {
    "AND".to_string()
}

impl TryFrom<ConditionRequest> for FilterCondition {
    type Error = ValidationError;

    fn try_from(req: ConditionRequest) -> Result<Self> {
        Ok(FilterCondition {
            field: req.field.parse()?,
            operator: req.operator.parse()?,
            value: req.value,
        })
    }
}

impl TryFrom<FilterRequest> for CohortFilter {
    type Error = ValidationError;

    fn try_from(req: FilterRequest) -> Result<Self> {
        let logic: Logic = req.logic.parse()?;
        let conditions = req
            .conditions
            .into_iter()
            .map(FilterCondition::try_from)
            .collect::<Result<Vec<_>>>()?;
        CohortFilter::new(conditions, logic)
    }
}

impl From<&CohortFilter> for FilterRequest {
    fn from(filter: &CohortFilter) -> Self {
        FilterRequest {
            conditions: filter
                .conditions()
                .iter()
                .map(|c| ConditionRequest {
                    field: c.field.name().to_string(),
                    operator: c.operator.as_str().to_string(),
                    value: c.value.clone(),
                })
                .collect(),
            logic: filter.logic().to_string(),
        }
    }
}

/// Bounded subset: `rowcount` is the match count before truncation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetResponse {
    pub rowcount: usize,
    pub records: Vec<Record>,
}

/// One page of a sorted cohort query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<Record>,
    /// Records in the dataset
    pub total: usize,
    /// Records matching the filter
    pub filtered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPairRow {
    pub test1: String,
    pub test2: String,
    pub co_occurrences: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePairRow {
    pub service1: String,
    pub service2: String,
    pub freq: u64,
}

impl From<&CoOccurrencePair> for TestPairRow {
    fn from(pair: &CoOccurrencePair) -> Self {
        Self {
            test1: pair.entity_a.clone(),
            test2: pair.entity_b.clone(),
            co_occurrences: pair.frequency,
        }
    }
}

impl From<&CoOccurrencePair> for ServicePairRow {
    fn from(pair: &CoOccurrencePair) -> Self {
        Self {
            service1: pair.entity_a.clone(),
            service2: pair.entity_b.clone(),
            freq: pair.frequency,
        }
    }
}

/// Any of the pair shapes a caller may hand back for matrix building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairRow {
    Test(TestPairRow),
    Service(ServicePairRow),
    Plain(CoOccurrencePair),
}

impl TryFrom<PairRow> for CoOccurrencePair {
    type Error = ValidationError;

    fn try_from(row: PairRow) -> std::result::Result<Self, Self::Error> {
        // Stored order is kept; consumers go through `key()` for lookups
        let pair = match row {
            PairRow::Test(r) => CoOccurrencePair {
                entity_a: r.test1,
                entity_b: r.test2,
                frequency: r.co_occurrences,
            },
            PairRow::Service(r) => CoOccurrencePair {
                entity_a: r.service1,
                entity_b: r.service2,
                frequency: r.freq,
            },
            PairRow::Plain(pair) => pair,
        };

        if pair.frequency == 0 {
            return Err(ValidationError::ZeroFrequency(pair.entity_a, pair.entity_b));
        }
        Ok(pair)
    }
}
