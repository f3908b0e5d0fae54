//! Assertions over CLI output.

use anyhow::{Context, Result};
use serde_json::Value;
use std::process::Output;

/// Parse stdout of a successful `--format json` run
pub fn json_stdout(output: &Output) -> Result<Value> {
    assert_success(output);
    let stdout = String::from_utf8(output.stdout.clone()).context("stdout is not UTF-8")?;
    serde_json::from_str(&stdout).with_context(|| format!("stdout is not JSON:\n{}", stdout))
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed with {}\nstdout:\n{}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Fail unless the command failed and its stderr mentions `needle`
pub fn assert_failure_mentions(output: &Output, needle: &str) {
    assert!(!output.status.success(), "command unexpectedly succeeded");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(needle),
        "stderr does not mention '{}':\n{}",
        needle,
        stderr
    );
}
