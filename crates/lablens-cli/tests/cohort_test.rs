mod common;

use common::{lablens, sample_world};
use lablens_testing::assertions::{assert_failure_mentions, json_stdout};

#[test]
fn test_query_pages_sorted_newest_first() {
    let world = sample_world();
    let output = lablens(&world)
        .args(["--format", "json", "query", "--where", "sex eq F", "--limit", "2"])
        .output()
        .unwrap();

    let page = json_stdout(&output).unwrap();
    assert_eq!(page["total"], 12);
    assert_eq!(page["filtered"], 6);

    let data = page["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["Date"], "2024-02-12");
    assert_eq!(data[0]["numorden"], "1001");
}

#[test]
fn test_query_sort_and_offset() {
    let world = sample_world();
    let output = lablens(&world)
        .args([
            "--format", "json", "query", "--where", "nombre eq GLUCOSA", "--sort", "edad",
            "--order", "asc", "--offset", "1", "--limit", "2",
        ])
        .output()
        .unwrap();

    let page = json_stdout(&output).unwrap();
    let ages: Vec<_> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["edad"].clone())
        .collect();
    assert_eq!(ages, vec![serde_json::json!(34), serde_json::json!(47)]);
}

#[test]
fn test_subset_rowcount_is_total_matches() {
    let world = sample_world();
    let output = lablens(&world)
        .args([
            "--format", "json", "subset", "--where", "edad gt 40", "--where", "sexo eq F", "--or",
            "--limit", "3",
        ])
        .output()
        .unwrap();

    let subset = json_stdout(&output).unwrap();
    // 6 rows for women plus 6 rows for subjects older than 40
    assert_eq!(subset["rowcount"], 12);
    assert_eq!(subset["records"].as_array().unwrap().len(), 3);
}

#[test]
fn test_filter_file() {
    let world = sample_world();
    let filter = world
        .write_file(
            "filter.json",
            r#"{"conditions": [{"column": "nombre", "operator": "contains", "value": "gluc"},
                               {"field": "age", "operator": "gte", "value": 40}],
                "logic": "AND"}"#,
        )
        .unwrap();

    let output = lablens(&world)
        .args(["--format", "json", "subset", "--filter"])
        .arg(&filter)
        .output()
        .unwrap();

    let subset = json_stdout(&output).unwrap();
    assert_eq!(subset["rowcount"], 2);
}

#[test]
fn test_validation_errors() {
    let world = sample_world();

    let output = lablens(&world).args(["query"]).output().unwrap();
    assert_failure_mentions(&output, "at least one condition");

    let output = lablens(&world)
        .args(["query", "--where", "weight gt 80"])
        .output()
        .unwrap();
    assert_failure_mentions(&output, "Unknown field: weight");

    let output = lablens(&world)
        .args(["query", "--where", "edad between 40"])
        .output()
        .unwrap();
    assert_failure_mentions(&output, "Unsupported operator: between");

    let output = lablens(&world)
        .args(["subset", "--where", "sexo eq F", "--limit", "0"])
        .output()
        .unwrap();
    assert_failure_mentions(&output, "Invalid limit");
}

#[test]
fn test_cohort_stats_json() {
    let world = sample_world();
    let output = lablens(&world)
        .args(["--format", "json", "cohort-stats", "--where", "sexo eq M"])
        .output()
        .unwrap();

    let stats = json_stdout(&output).unwrap();
    assert_eq!(stats["total_rows"], 6);

    let columns = stats["columns"].as_array().unwrap();
    let age = columns.iter().find(|c| c["column"] == "edad").unwrap();
    assert_eq!(age["missing"], 0);
    assert_eq!(age["numeric"]["count"], 6);
}
