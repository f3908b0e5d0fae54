use chrono::NaiveDate;
use lablens_engine::{run_subset, subset};
use lablens_types::{
    CohortFilter, Field, FilterCondition, FilterRequest, Logic, Operator, Record, ResultValue, Sex,
};
use std::fs;
use std::path::Path;

fn load_records_from_fixture(fixture_name: &str) -> Vec<Record> {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn person(sex: Sex, age: i64) -> Record {
    Record {
        subject_id: format!("{}-{}", sex, age),
        sex,
        age: Some(age),
        test_name: "GLUCOSA".to_string(),
        result_value: ResultValue::Number(5.0),
        service_unit: "URGENCIAS".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

#[test]
fn test_filter_by_sex_keeps_original_order() {
    let records = vec![person(Sex::Female, 30), person(Sex::Male, 40), person(Sex::Female, 50)];
    let filter =
        CohortFilter::all(vec![FilterCondition::new(Field::Sex, Operator::Eq, "F")]).unwrap();

    let result = run_subset(&records, &filter, 100);

    assert_eq!(result.total_count, 2);
    assert_eq!(result.matches, vec![records[0].clone(), records[2].clone()]);
}

#[test]
fn test_non_numeric_comparison_matches_nothing() {
    let records = load_records_from_fixture("records.json");
    let filter =
        CohortFilter::all(vec![FilterCondition::new(Field::Age, Operator::Gt, "old")]).unwrap();

    let result = run_subset(&records, &filter, 100);

    assert_eq!(result.total_count, 0);
    assert!(result.matches.is_empty());
}

#[test]
fn test_ne_with_mistyped_value_matches_nothing() {
    let records = load_records_from_fixture("records.json");

    for (field, value) in [(Field::Age, "abc"), (Field::Sex, "X"), (Field::Date, "garbage")] {
        let filter =
            CohortFilter::all(vec![FilterCondition::new(field, Operator::Ne, value)]).unwrap();
        let result = run_subset(&records, &filter, 100);
        assert_eq!(result.total_count, 0, "{} ne {}", field, value);
    }
}

#[test]
fn test_subset_is_idempotent() {
    let records = load_records_from_fixture("records.json");
    let filter = CohortFilter::any(vec![
        FilterCondition::new(Field::TestName, Operator::Contains, "gluc"),
        FilterCondition::new(Field::Age, Operator::Gte, 60_i64),
    ])
    .unwrap();

    let first = run_subset(&records, &filter, 3);
    let second = run_subset(&records, &filter, 3);

    assert_eq!(first, second);
    assert_eq!(first.matches.len(), 3);
    assert_eq!(first.total_count, 7);
}

#[test]
fn test_and_never_matches_more_than_or() {
    let records = load_records_from_fixture("records.json");
    let condition_sets = vec![
        vec![
            FilterCondition::new(Field::Sex, Operator::Eq, "F"),
            FilterCondition::new(Field::ServiceUnit, Operator::Eq, "URGENCIAS"),
        ],
        vec![
            FilterCondition::new(Field::ResultValue, Operator::Lt, 1_i64),
            FilterCondition::new(Field::Date, Operator::Gte, "2024-01-09"),
            FilterCondition::new(Field::Age, Operator::Ne, 34_i64),
        ],
        vec![FilterCondition::new(Field::SubjectId, Operator::Eq, "1004")],
    ];

    for conditions in condition_sets {
        let and = CohortFilter::new(conditions.clone(), Logic::And).unwrap();
        let or = and.with_logic(Logic::Or);

        let and_count = run_subset(&records, &and, usize::MAX).total_count;
        let or_count = run_subset(&records, &or, usize::MAX).total_count;
        assert!(and_count <= or_count, "{} => {} > {}", and, and_count, or_count);
    }
}

#[test]
fn test_wire_filter_on_fixture() {
    let records = load_records_from_fixture("records.json");
    let request: FilterRequest = serde_json::from_str(
        r#"{
            "conditions": [
                {"field": "nombre", "operator": "eq", "value": "GLUCOSA"},
                {"field": "textores", "operator": "gte", "value": 5.4}
            ],
            "logic": "AND"
        }"#,
    )
    .unwrap();
    let filter = CohortFilter::try_from(request).unwrap();

    let result = run_subset(&records, &filter, 10);
    let subjects: Vec<&str> = result.matches.iter().map(|r| r.subject_id.as_str()).collect();

    // "Hemolizada" cannot be compared and 5.0 is below the bound
    assert_eq!(subjects, ["1001", "1001", "1002"]);
}

#[test]
fn test_parallel_subset_on_fixture() {
    let records = load_records_from_fixture("records.json");
    let filter = CohortFilter::all(vec![FilterCondition::new(
        Field::ServiceUnit,
        Operator::Contains,
        "o",
    )])
    .unwrap();

    assert_eq!(
        subset::run(&records, &filter, 4),
        subset::run_parallel(&records, &filter, 4)
    );
}
