use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn help(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("lablens").unwrap();
    cmd.args(args).arg("--help").assert().success()
}

#[test]
fn test_main_help_lists_commands() {
    help(&[]).stdout(
        predicate::str::contains("Usage: lablens")
            .and(predicate::str::contains("query"))
            .and(predicate::str::contains("cohort-stats"))
            .and(predicate::str::contains("matrix"))
            .and(predicate::str::contains("--data-dir")),
    );
}

#[test]
fn test_query_help_shows_filter_flags() {
    help(&["query"]).stdout(
        predicate::str::contains("--where <EXPR>")
            .and(predicate::str::contains("--filter <FILE>"))
            .and(predicate::str::contains("--or"))
            .and(predicate::str::contains("[possible values: asc, desc]")),
    );
}

#[test]
fn test_export_help_shows_formats() {
    help(&["export"]).stdout(
        predicate::str::contains("--as <FORMAT>")
            .and(predicate::str::contains("[possible values: csv, jsonl]"))
            .and(predicate::str::contains("[possible values: subset, panels]")),
    );
}
