use chrono::NaiveDate;
use lablens_engine::{build_matrix, service_pairs, test_pairs};
use lablens_types::{CoOccurrencePair, Matrix, Record, ResultValue, Sex};
use std::fs;
use std::path::Path;

fn load_records_from_fixture(fixture_name: &str) -> Vec<Record> {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn test_on(subject: &str, date: &str, test: &str) -> Record {
    Record {
        subject_id: subject.to_string(),
        sex: Sex::Female,
        age: Some(52),
        test_name: test.to_string(),
        result_value: ResultValue::Text("ok".to_string()),
        service_unit: "LAB".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

fn assert_symmetric_with_zero_diagonal(matrix: &Matrix) {
    for (i, row) in matrix.cells.iter().enumerate() {
        assert_eq!(row[i], 0, "diagonal at {}", matrix.axis[i]);
        for (j, value) in row.iter().enumerate() {
            assert_eq!(*value, matrix.cells[j][i], "asymmetric at ({}, {})", i, j);
        }
    }
}

#[test]
fn test_single_session_to_matrix() {
    let records = vec![
        test_on("P1", "2024-01-01", "A"),
        test_on("P1", "2024-01-01", "B"),
        test_on("P1", "2024-01-01", "C"),
    ];

    let pairs = test_pairs(&records);
    assert_eq!(
        pairs,
        vec![
            CoOccurrencePair::new("A", "B", 1),
            CoOccurrencePair::new("A", "C", 1),
            CoOccurrencePair::new("B", "C", 1),
        ]
    );

    let matrix = build_matrix(&pairs);
    insta::assert_json_snapshot!(matrix.to_series(), @r#"
    {
      "axis": [
        "A",
        "B",
        "C"
      ],
      "series": [
        {
          "name": "A",
          "data": [
            0,
            1,
            1
          ]
        },
        {
          "name": "B",
          "data": [
            1,
            0,
            1
          ]
        },
        {
          "name": "C",
          "data": [
            1,
            1,
            0
          ]
        }
      ]
    }
    "#);
}

#[test]
fn test_empty_pairs_give_empty_matrix() {
    let matrix = build_matrix(&[]);
    assert_eq!(matrix, Matrix::default());
}

#[test]
fn test_pair_order_does_not_matter() {
    let forward = vec![test_on("P1", "2024-01-01", "A"), test_on("P1", "2024-01-01", "B")];
    let backward = vec![test_on("P2", "2024-01-01", "B"), test_on("P2", "2024-01-01", "A")];
    let both: Vec<Record> = forward.iter().chain(&backward).cloned().collect();

    assert_eq!(test_pairs(&forward), test_pairs(&backward));
    assert_eq!(test_pairs(&both), vec![CoOccurrencePair::new("A", "B", 2)]);
}

#[test]
fn test_fixture_test_matrix() {
    let records = load_records_from_fixture("records.json");
    let matrix = build_matrix(&test_pairs(&records));

    assert_symmetric_with_zero_diagonal(&matrix);
    // GLUCOSA appears in every multi-test session
    assert_eq!(matrix.axis[0], "GLUCOSA");
    assert_eq!(matrix.cell("GLUCOSA", "CREATININA"), Some(3));
    assert_eq!(matrix.cell("CREATININA", "GLUCOSA"), Some(3));
    assert_eq!(matrix.cell("TSH", "HBA1C"), Some(0));
}

#[test]
fn test_fixture_service_matrix() {
    let records = load_records_from_fixture("records.json");
    let pairs = service_pairs(&records);

    assert!(pairs.iter().all(|p| p.entity_a < p.entity_b && p.frequency >= 1));

    let matrix = build_matrix(&pairs);
    assert_symmetric_with_zero_diagonal(&matrix);
    assert_eq!(matrix.axis, ["ENDOCRINOLOGIA", "NEFROLOGIA", "URGENCIAS"]);
    assert_eq!(matrix.cell("URGENCIAS", "ENDOCRINOLOGIA"), Some(1));
}
