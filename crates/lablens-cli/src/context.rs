use crate::types::OutputFormat;
use anyhow::Result;
use lablens_runtime::{resolve_data_dir, Workspace};
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    data_dir: PathBuf,
    data_file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(
        data_dir: Option<&str>,
        data_file: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self> {
        Ok(Self {
            data_dir: resolve_data_dir(data_dir)?,
            data_file,
            format,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Load config and dataset for a command that reads records
    pub fn workspace(&self) -> Result<Workspace> {
        let workspace = Workspace::open(self.data_dir.clone(), self.data_file.clone())?;
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            records = workspace.dataset().len(),
            "workspace opened"
        );
        Ok(workspace)
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
