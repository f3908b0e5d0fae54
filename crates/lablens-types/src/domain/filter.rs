use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::record::parse_date;
use crate::error::{Result, ValidationError};

/// Record fields a condition can address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    SubjectId,
    Sex,
    Age,
    TestName,
    ResultValue,
    ServiceUnit,
    Date,
}

/// Semantic type of a field; a condition whose value does not read as the
/// field's kind never matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Category,
    Integer,
    /// Numeric when the result parses as a number, text otherwise
    Mixed,
    Date,
}

impl FieldKind {
    /// Whether a filter value can be read as this kind
    pub fn accepts(&self, value: &FilterValue) -> bool {
        match self {
            FieldKind::Text | FieldKind::Mixed => true,
            FieldKind::Integer => value.as_number().is_some(),
            FieldKind::Category => matches!(value, FilterValue::Text(s) if s == "M" || s == "F"),
            FieldKind::Date => value.as_date().is_some(),
        }
    }
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::SubjectId,
        Field::Sex,
        Field::Age,
        Field::TestName,
        Field::ResultValue,
        Field::ServiceUnit,
        Field::Date,
    ];

    /// Canonical (camelCase) name
    pub fn name(&self) -> &'static str {
        match self {
            Field::SubjectId => "subjectId",
            Field::Sex => "sex",
            Field::Age => "age",
            Field::TestName => "testName",
            Field::ResultValue => "resultValue",
            Field::ServiceUnit => "serviceUnit",
            Field::Date => "date",
        }
    }

    /// Column name in the record source
    pub fn column(&self) -> &'static str {
        match self {
            Field::SubjectId => "numorden",
            Field::Sex => "sexo",
            Field::Age => "edad",
            Field::TestName => "nombre",
            Field::ResultValue => "textores",
            Field::ServiceUnit => "nombre2",
            Field::Date => "Date",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::SubjectId | Field::TestName | Field::ServiceUnit => FieldKind::Text,
            Field::Sex => FieldKind::Category,
            Field::Age => FieldKind::Integer,
            Field::ResultValue => FieldKind::Mixed,
            Field::Date => FieldKind::Date,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let field = match s {
            "subjectId" | "subject_id" | "numorden" => Field::SubjectId,
            "sex" | "sexo" => Field::Sex,
            "age" | "edad" => Field::Age,
            "testName" | "test_name" | "nombre" => Field::TestName,
            "resultValue" | "result_value" | "textores" => Field::ResultValue,
            "serviceUnit" | "service_unit" | "nombre2" => Field::ServiceUnit,
            "date" | "Date" => Field::Date,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        };
        Ok(field)
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Comparison operators; a closed set so dispatch is a single `match`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let op = match s {
            "eq" | "=" | "==" => Operator::Eq,
            "ne" | "!=" => Operator::Ne,
            "gt" | ">" => Operator::Gt,
            "lt" | "<" => Operator::Lt,
            "gte" | ">=" => Operator::Gte,
            "lte" | "<=" => Operator::Lte,
            "contains" | "~" => Operator::Contains,
            other => return Err(ValidationError::UnknownOperator(other.to_string())),
        };
        Ok(op)
    }
}

/// How conditions combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Logic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => f.write_str("AND"),
            Logic::Or => f.write_str("OR"),
        }
    }
}

impl FromStr for Logic {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Logic::And),
            "OR" => Ok(Logic::Or),
            _ => Err(ValidationError::UnknownLogic(s.to_string())),
        }
    }
}

/// Right-hand side of a condition as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Numeric reading; text counts when it parses as a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_date(&self) -> Option<chrono::NaiveDate> {
        match self {
            FilterValue::Text(s) => parse_date(s),
            FilterValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n as f64)
    }
}

/// A single predicate: `field operator value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCondition {
    pub field: Field,
    pub operator: Operator,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn new(field: Field, operator: Operator, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Parse a `<field> <op> <value>` expression, e.g. `edad gte 40` or
    /// `nombre contains gluc`. Everything after the operator is the value.
    pub fn parse_expr(expr: &str) -> Result<Self> {
        let mut parts = expr.trim().splitn(3, char::is_whitespace);
        let (Some(field), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationError::MalformedCondition(expr.to_string()));
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::MalformedCondition(expr.to_string()));
        }

        Ok(Self {
            field: field.parse()?,
            operator: op.parse()?,
            value: FilterValue::Text(value.to_string()),
        })
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// A validated boolean combination of conditions.
///
/// Construction is the only place validation happens; holding a
/// `CohortFilter` guarantees a non-empty condition list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortFilter {
    conditions: Vec<FilterCondition>,
    logic: Logic,
}

impl CohortFilter {
    pub fn new(conditions: Vec<FilterCondition>, logic: Logic) -> Result<Self> {
        if conditions.is_empty() {
            return Err(ValidationError::EmptyConditions);
        }
        Ok(Self { conditions, logic })
    }

    pub fn all(conditions: Vec<FilterCondition>) -> Result<Self> {
        Self::new(conditions, Logic::And)
    }

    pub fn any(conditions: Vec<FilterCondition>) -> Result<Self> {
        Self::new(conditions, Logic::Or)
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn logic(&self) -> Logic {
        self.logic
    }

    /// Same conditions, different combinator
    pub fn with_logic(&self, logic: Logic) -> Self {
        Self {
            conditions: self.conditions.clone(),
            logic,
        }
    }
}

impl fmt::Display for CohortFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = format!(" {} ", self.logic);
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(&joiner))
    }
}
