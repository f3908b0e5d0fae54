//! Cleaning rules applied to every raw row before it becomes a `Record`.
//!
//! - `Date` accepts `YYYY-MM-DD` and `DD/MM/YYYY`; anything else drops the row
//! - `edad` of zero, blank or non-numeric is a missing age
//! - blank `nombre2` becomes `"Unknown"`
//! - `textores` is numeric when it parses, text otherwise

use lablens_types::{parse_date, Record, ResultValue, Sex};

use crate::traits::LoadOptions;

pub const UNKNOWN_SERVICE: &str = "Unknown";

/// One source row, still as text, in source column order
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    pub numorden: &'a str,
    pub sexo: &'a str,
    pub edad: &'a str,
    pub nombre: &'a str,
    pub textores: &'a str,
    pub nombre2: &'a str,
    pub date: &'a str,
}

/// Turn a raw row into a record, or explain why it cannot be one
pub fn clean_row(raw: &RawRow<'_>, options: &LoadOptions) -> Result<Record, String> {
    let subject_id = raw.numorden.trim();
    if subject_id.is_empty() {
        return Err("empty numorden".to_string());
    }

    let test_name = raw.nombre.trim();
    if test_name.is_empty() {
        return Err("empty nombre".to_string());
    }

    let sex: Sex = raw.sexo.parse()?;

    let date = parse_date(raw.date).ok_or_else(|| format!("invalid Date: '{}'", raw.date.trim()))?;

    let age = parse_age(raw.edad);
    if age.is_none() && options.drop_missing_age {
        return Err("missing edad".to_string());
    }

    let service_unit = match raw.nombre2.trim() {
        "" => UNKNOWN_SERVICE.to_string(),
        unit => unit.to_string(),
    };

    Ok(Record {
        subject_id: subject_id.to_string(),
        sex,
        age,
        test_name: test_name.to_string(),
        result_value: ResultValue::parse(raw.textores),
        service_unit,
        date,
    })
}

/// Ages arrive as "34", "34.0" or blank; zero means unknown
fn parse_age(raw: &str) -> Option<i64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some(value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw<'a>() -> RawRow<'a> {
        RawRow {
            numorden: " 1001 ",
            sexo: "f",
            edad: "34.0",
            nombre: "GLUCOSA",
            textores: "5.40",
            nombre2: "",
            date: "08/01/2024",
        }
    }

    #[test]
    fn test_clean_row_applies_rules() {
        let record = clean_row(&raw(), &LoadOptions::default()).unwrap();

        assert_eq!(record.subject_id, "1001");
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.age, Some(34));
        assert_eq!(record.result_value, ResultValue::Number(5.4));
        assert_eq!(record.service_unit, UNKNOWN_SERVICE);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn test_zero_age_is_missing() {
        let row = RawRow { edad: "0", ..raw() };
        assert_eq!(clean_row(&row, &LoadOptions::default()).unwrap().age, None);

        let strict = LoadOptions {
            drop_missing_age: true,
        };
        assert_eq!(clean_row(&row, &strict), Err("missing edad".to_string()));
    }

    #[test]
    fn test_rejected_rows() {
        let options = LoadOptions::default();
        assert!(clean_row(&RawRow { date: "soon", ..raw() }, &options).is_err());
        assert!(clean_row(&RawRow { sexo: "X", ..raw() }, &options).is_err());
        assert!(clean_row(&RawRow { numorden: "  ", ..raw() }, &options).is_err());
        assert!(clean_row(&RawRow { nombre: "", ..raw() }, &options).is_err());
    }
}
