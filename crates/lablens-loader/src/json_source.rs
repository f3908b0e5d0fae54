use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::clean::{clean_row, RawRow};
use crate::traits::{LoadOptions, LoadReport, RecordSource, SkippedRow};
use crate::{Error, Result, EXPECTED_COLUMNS};

/// JSON array of row objects, or a subset response (`{"records": [...]}`)
pub struct JsonSource;

impl RecordSource for JsonSource {
    fn id(&self) -> &'static str {
        "json"
    }

    fn probe(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn load(&self, path: &Path, options: &LoadOptions) -> Result<LoadReport> {
        let content = fs::read_to_string(path)?;
        read_json(&content, options)
    }
}

pub fn load_json(path: &Path, options: &LoadOptions) -> Result<LoadReport> {
    JsonSource.load(path, options)
}

pub fn read_json(content: &str, options: &LoadOptions) -> Result<LoadReport> {
    let rows = match serde_json::from_str::<Value>(content)? {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => match obj.remove("records") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(Error::MissingColumn("records".to_string())),
        },
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "JSON {} at top level",
                kind_of(&other)
            )));
        }
    };

    let mut report = LoadReport::default();

    for (index, row) in rows.iter().enumerate() {
        let line = index as u64 + 1;
        match row_to_record(row, options) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::debug!(line, %reason, "skipping row");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    Ok(report)
}

fn row_to_record(row: &Value, options: &LoadOptions) -> std::result::Result<lablens_types::Record, String> {
    let Value::Object(obj) = row else {
        return Err(format!("expected object, found {}", kind_of(row)));
    };

    let mut cells = Vec::with_capacity(EXPECTED_COLUMNS.len());
    for column in EXPECTED_COLUMNS {
        cells.push(cell_text(obj, column)?);
    }

    let raw = RawRow {
        numorden: &cells[0],
        sexo: &cells[1],
        edad: &cells[2],
        nombre: &cells[3],
        textores: &cells[4],
        nombre2: &cells[5],
        date: &cells[6],
    };
    clean_row(&raw, options)
}

fn cell_text(obj: &Map<String, Value>, column: &str) -> std::result::Result<String, String> {
    match obj.get(column) {
        None => Err(format!("missing column {}", column)),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lablens_types::ResultValue;

    #[test]
    fn test_array_of_rows() {
        let content = r#"[
            {"numorden": 1001, "sexo": "F", "edad": 34, "nombre": "GLUCOSA",
             "textores": 5.4, "nombre2": null, "Date": "2024-01-08"},
            {"numorden": "1002", "sexo": "M", "edad": null, "nombre": "TSH",
             "textores": "Indetectable", "nombre2": "ENDOCRINOLOGIA", "Date": "09/01/2024"}
        ]"#;
        let report = read_json(content, &LoadOptions::default()).unwrap();

        assert_eq!(report.loaded(), 2);
        assert_eq!(report.records[0].subject_id, "1001");
        assert_eq!(report.records[0].result_value, ResultValue::Number(5.4));
        assert_eq!(report.records[0].service_unit, "Unknown");
        assert_eq!(report.records[1].age, None);
    }

    #[test]
    fn test_subset_response_shape() {
        let content = r#"{"rowcount": 1, "records": [
            {"numorden": "7", "sexo": "F", "edad": 60, "nombre": "PCR",
             "textores": "Positivo", "nombre2": "UCI", "Date": "2024-02-01"}
        ]}"#;
        let report = read_json(content, &LoadOptions::default()).unwrap();
        assert_eq!(report.loaded(), 1);
    }

    #[test]
    fn test_row_missing_column_is_skipped() {
        let content = r#"[{"numorden": "7", "sexo": "F"}]"#;
        let report = read_json(content, &LoadOptions::default()).unwrap();

        assert_eq!(report.loaded(), 0);
        assert_eq!(report.skipped[0].line, 1);
        assert!(report.skipped[0].reason.contains("edad"));
    }

    #[test]
    fn test_scalar_top_level_is_rejected() {
        let err = read_json("42", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
