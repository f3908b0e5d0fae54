use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter::Field;

/// Biological sex as recorded by the laboratory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    /// Accepts `M`/`F` in any case; `H` (hombre) is read as male.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "H" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(format!("invalid sex: {}", other)),
        }
    }
}

/// A laboratory result: numeric when the value parses, free text otherwise
/// (e.g. "Negativo", "<0.5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(f64),
    Text(String),
}

impl ResultValue {
    /// Classify a raw cell: anything `f64` accepts becomes a number.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => ResultValue::Number(n),
            _ => ResultValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResultValue::Number(n) => Some(*n),
            ResultValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Number(n) => write!(f, "{}", n),
            ResultValue::Text(s) => f.write_str(s),
        }
    }
}

/// One laboratory test result row.
///
/// Serialized with the source column names so records round-trip through
/// the same shape the loader reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "numorden")]
    pub subject_id: String,

    #[serde(rename = "sexo")]
    pub sex: Sex,

    #[serde(rename = "edad")]
    pub age: Option<i64>,

    #[serde(rename = "nombre")]
    pub test_name: String,

    #[serde(rename = "textores")]
    pub result_value: ResultValue,

    #[serde(rename = "nombre2")]
    pub service_unit: String,

    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

/// Borrowed view of a single record field, typed by the field's semantics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
    Null,
}

impl Record {
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::SubjectId => FieldValue::Text(&self.subject_id),
            Field::Sex => FieldValue::Text(self.sex.as_str()),
            Field::Age => match self.age {
                Some(age) => FieldValue::Number(age as f64),
                None => FieldValue::Null,
            },
            Field::TestName => FieldValue::Text(&self.test_name),
            Field::ResultValue => match &self.result_value {
                ResultValue::Number(n) => FieldValue::Number(*n),
                ResultValue::Text(s) => FieldValue::Text(s),
            },
            Field::ServiceUnit => FieldValue::Text(&self.service_unit),
            Field::Date => FieldValue::Date(self.date),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Null => Ok(()),
        }
    }
}

/// Parse a calendar date in ISO (`2024-01-31`) or day-first (`31/01/2024`) form.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            // Timestamps such as "2024-01-31 00:00:00" keep only the date part
            raw.split_whitespace()
                .next()
                .filter(|head| head.len() < raw.len())
                .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        })
}
