use lablens_runtime::{Config, Dataset, Error, InitOutcome, QueryOptions, Workspace};
use lablens_testing::fixtures::{sample_records, SampleFiles, SAMPLE_CSV, SAMPLE_JSON};
use lablens_types::{CohortFilter, EntityField, Field, FilterCondition, Operator, ValidationError};
use std::path::PathBuf;
use tempfile::TempDir;

fn women() -> CohortFilter {
    CohortFilter::all(vec![FilterCondition::new(Field::Sex, Operator::Eq, "F")]).unwrap()
}

fn sample_workspace() -> Workspace {
    Workspace::with_dataset(Config::default(), Dataset::from_records(sample_records()))
}

#[test]
fn test_open_without_data_reports_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = Workspace::open(temp_dir.path().to_path_buf(), None).unwrap();

    let err = workspace.subset(&women(), None).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));
    assert!(matches!(workspace.summary(), Err(Error::DataUnavailable(_))));
}

#[test]
fn test_open_uses_configured_data_path() {
    let temp_dir = TempDir::new().unwrap();
    let samples = SampleFiles::new();
    samples
        .copy_to(SAMPLE_CSV, &temp_dir.path().join(SAMPLE_CSV))
        .unwrap();
    Workspace::init(temp_dir.path(), Some(PathBuf::from(SAMPLE_CSV)), false).unwrap();

    let workspace = Workspace::open(temp_dir.path().to_path_buf(), None).unwrap();

    assert_eq!(workspace.dataset().records(), sample_records().as_slice());
    assert!(workspace.dataset().skipped().is_empty());
}

#[test]
fn test_data_override_wins_over_config() {
    let temp_dir = TempDir::new().unwrap();
    Workspace::init(temp_dir.path(), Some(PathBuf::from("absent.csv")), false).unwrap();

    let json = SampleFiles::new().path(SAMPLE_JSON);
    let workspace = Workspace::open(temp_dir.path().to_path_buf(), Some(json)).unwrap();

    assert_eq!(workspace.dataset().len(), 12);
}

#[test]
fn test_init_keeps_existing_config() {
    let temp_dir = TempDir::new().unwrap();

    let first = Workspace::init(temp_dir.path(), None, false).unwrap();
    assert!(matches!(first, InitOutcome::Created(_)));

    let second = Workspace::init(temp_dir.path(), None, false).unwrap();
    assert!(matches!(second, InitOutcome::AlreadyExists(_)));

    let forced = Workspace::init(temp_dir.path(), None, true).unwrap();
    assert!(matches!(forced, InitOutcome::Created(_)));
}

#[test]
fn test_zero_limit_is_rejected() {
    let workspace = sample_workspace();

    let err = workspace.subset(&women(), Some(0)).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidLimit)));

    let err = workspace
        .pairs(EntityField::TestName, None, Some(0))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidLimit)));
}

#[test]
fn test_limits_are_clamped() {
    let config = Config {
        max_limit: 3,
        ..Config::default()
    };
    let workspace = Workspace::with_dataset(config, Dataset::from_records(sample_records()));

    let subset = workspace.subset(&women(), Some(100)).unwrap();
    assert_eq!(subset.rowcount, 6);
    assert_eq!(subset.records.len(), 3);

    let page = workspace.query_page(&women(), &QueryOptions::default()).unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.total, 12);
    assert_eq!(page.filtered, 6);
}

#[test]
fn test_query_page_defaults_to_newest_first() {
    let workspace = sample_workspace();
    let page = workspace.query_page(&women(), &QueryOptions::default()).unwrap();

    let first = &page.data[0];
    assert_eq!(first.subject_id, "1001");
    assert_eq!(first.date.to_string(), "2024-02-12");
}

#[test]
fn test_matrix_uses_configured_top() {
    let config = Config {
        matrix_top: Some(2),
        ..Config::default()
    };
    let workspace = Workspace::with_dataset(config, Dataset::from_records(sample_records()));

    let matrix = workspace.matrix(EntityField::TestName, None, None).unwrap();
    assert_eq!(matrix.axis, vec!["GLUCOSA", "CREATININA"]);

    let wider = workspace.matrix(EntityField::TestName, None, Some(3)).unwrap();
    assert_eq!(wider.len(), 3);
}

#[test]
fn test_history_and_summary() {
    let workspace = sample_workspace();

    let panels = workspace.panels(Some("1001")).unwrap();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0].tests_list(), "CREATININA,GLUCOSA,HEMOGRAMA");

    let repeats = workspace.repeats(None).unwrap();
    assert_eq!(repeats.len(), 1);
    assert_eq!(repeats[0].test_name, "GLUCOSA");
    assert_eq!(repeats[0].days_span, 36);

    let summary = workspace.summary().unwrap();
    assert_eq!(summary.total_patients, 4);
    assert_eq!(summary.missing_age, 2);
}

#[test]
fn test_unknown_test_is_not_found() {
    let workspace = sample_workspace();

    assert!(matches!(workspace.test_stats("PSA"), Err(Error::NotFound(_))));
    let glucose = workspace.test_stats("GLUCOSA").unwrap();
    assert_eq!(glucose.total, 5);
}
