use anyhow::Result;
use lablens_loader::{load, Error, LoadOptions};
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "numorden,sexo,edad,nombre,textores,nombre2,Date\n";

#[test]
fn test_load_csv_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("lab.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\
             1001,F,34,GLUCOSA,5.4,ENDOCRINOLOGIA,08/01/2024\n\
             1001,F,34,CREATININA,0.9,,08/01/2024\n\
             1002,H,0,TSH,Indetectable,ENDOCRINOLOGIA,2024-01-09\n"
        ),
    )?;

    let report = load(&path, &LoadOptions::default())?;

    assert_eq!(report.loaded(), 3);
    assert!(report.skipped.is_empty());
    assert_eq!(report.records[1].service_unit, "Unknown");
    assert_eq!(report.records[2].age, None);
    assert_eq!(report.records[2].sex.as_str(), "M");
    Ok(())
}

#[test]
fn test_drop_missing_age_option() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("lab.csv");
    fs::write(
        &path,
        format!("{HEADER}1,F,0,A,1,X,2024-01-01\n2,F,40,A,1,X,2024-01-01\n"),
    )?;

    let report = load(
        &path,
        &LoadOptions {
            drop_missing_age: true,
        },
    )?;

    assert_eq!(report.loaded(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, "missing edad");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load(&dir.path().join("absent.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_json_roundtrip_of_loaded_records() -> Result<()> {
    let dir = TempDir::new()?;
    let csv_path = dir.path().join("lab.csv");
    fs::write(&csv_path, format!("{HEADER}9,M,71,PCR,Positivo,UCI,2024-03-02\n"))?;
    let from_csv = load(&csv_path, &LoadOptions::default())?;

    let json_path = dir.path().join("lab.json");
    fs::write(&json_path, serde_json::to_string(&from_csv.records)?)?;
    let from_json = load(&json_path, &LoadOptions::default())?;

    assert_eq!(from_csv.records, from_json.records);
    Ok(())
}
