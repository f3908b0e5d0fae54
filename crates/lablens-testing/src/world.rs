//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{SampleFiles, SAMPLE_CSV};

/// Isolated lablens environment.
///
/// # Example
/// ```ignore
/// use lablens_testing::TestWorld;
///
/// let world = TestWorld::new().with_sample_data()?;
/// let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lablens");
/// world.configure_command(&mut cmd).arg("stats");
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with an empty data directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".lablens");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            samples: SampleFiles::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Copy the sample CSV into the data dir and point `config.toml` at it.
    pub fn with_sample_data(self) -> Result<Self> {
        self.samples
            .copy_to(SAMPLE_CSV, &self.data_dir.join(SAMPLE_CSV))?;
        self.write_config(&format!("data_path = \"{}\"\n", SAMPLE_CSV))?;
        Ok(self)
    }

    /// Replace `config.toml` in the data dir.
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.data_dir.join("config.toml"), content)?;
        Ok(())
    }

    /// Write a file under the temp root and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Point the command at this world's data dir with a clean environment.
    ///
    /// The caller provides the base command (e.g. `cargo_bin_cmd!("lablens")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("LABLENS_PATH");
        cmd.env_remove("RUST_LOG");
        cmd
    }
}
