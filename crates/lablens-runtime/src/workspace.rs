use std::path::{Path, PathBuf};
use std::sync::Arc;

use lablens_engine::{CohortStats, DatasetSummary, Page, Panel, Repeat};
use lablens_loader::LoadOptions;
use lablens_types::{
    CoOccurrencePair, CohortFilter, EntityField, Matrix, QueryResponse, SubsetResponse,
};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::ops::{self, QueryOptions, TestStats};
use crate::Result;

/// Subset requests without a limit return at most this many rows
pub const DEFAULT_SUBSET_LIMIT: usize = 10_000;

/// Pair listings without a limit return at most this many pairs
pub const DEFAULT_PAIR_LIMIT: usize = 50;

/// Outcome of `Workspace::init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// A data directory with its configuration and the loaded dataset
pub struct Workspace {
    data_dir: PathBuf,
    config: Arc<Config>,
    dataset: Dataset,
}

impl Workspace {
    /// Write a default `config.toml` unless one exists (or `force` is set).
    pub fn init(data_dir: &Path, data_path: Option<PathBuf>, force: bool) -> Result<InitOutcome> {
        let config_path = Config::path_in(data_dir);
        if config_path.exists() && !force {
            return Ok(InitOutcome::AlreadyExists(config_path));
        }

        let config = Config {
            data_path,
            ..Config::default()
        };
        config.save_to(&config_path)?;
        tracing::info!(path = %config_path.display(), "wrote config");
        Ok(InitOutcome::Created(config_path))
    }

    /// Load config from `data_dir` and the dataset it names.
    ///
    /// `data_override` wins over `data_path` from the config. With neither,
    /// the workspace opens with an empty dataset and every query reports
    /// `DataUnavailable`.
    pub fn open(data_dir: PathBuf, data_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(&data_dir))?;

        let data_file = data_override.or_else(|| config.data_file(&data_dir));
        let dataset = match data_file {
            Some(path) => {
                let options = LoadOptions {
                    drop_missing_age: config.drop_missing_age,
                };
                Dataset::load(&path, &options)?
            }
            None => Dataset::empty(),
        };

        Ok(Self {
            data_dir,
            config: Arc::new(config),
            dataset,
        })
    }

    pub fn with_dataset(config: Config, dataset: Dataset) -> Self {
        Self {
            data_dir: PathBuf::new(),
            config: Arc::new(config),
            dataset,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn subset(&self, filter: &CohortFilter, limit: Option<usize>) -> Result<SubsetResponse> {
        let records = self.dataset.require()?;
        let limit = self.limit_or(limit, DEFAULT_SUBSET_LIMIT)?;
        Ok(ops::subset(records, filter, limit))
    }

    /// A missing `options.limit` uses `default_limit` from the config
    pub fn query_page(&self, filter: &CohortFilter, options: &QueryOptions) -> Result<QueryResponse> {
        let records = self.dataset.require()?;
        let page = Page {
            offset: options.offset,
            limit: self.config.effective_limit(options.limit)?,
            sort: options.sort,
        };
        Ok(ops::query_page(records, filter, &page))
    }

    pub fn cohort_stats(&self, filter: Option<&CohortFilter>) -> Result<CohortStats> {
        let records = self.dataset.require()?;
        Ok(ops::cohort_stats(records, filter))
    }

    pub fn pairs(
        &self,
        entity: EntityField,
        filter: Option<&CohortFilter>,
        limit: Option<usize>,
    ) -> Result<Vec<CoOccurrencePair>> {
        let records = self.dataset.require()?;
        let limit = self.limit_or(limit, DEFAULT_PAIR_LIMIT)?;
        Ok(ops::pairs(records, entity, filter, limit))
    }

    /// `top` of `None` falls back to `matrix_top` from the config
    pub fn matrix(
        &self,
        entity: EntityField,
        filter: Option<&CohortFilter>,
        top: Option<usize>,
    ) -> Result<Matrix> {
        let records = self.dataset.require()?;
        let top = match top.or(self.config.matrix_top) {
            Some(0) => return Err(lablens_types::ValidationError::InvalidLimit.into()),
            top => top,
        };
        Ok(ops::matrix(records, entity, filter, top))
    }

    pub fn panels(&self, subject: Option<&str>) -> Result<Vec<Panel>> {
        let records = self.dataset.require()?;
        Ok(ops::panels(records, subject))
    }

    pub fn repeats(&self, subject: Option<&str>) -> Result<Vec<Repeat>> {
        let records = self.dataset.require()?;
        Ok(ops::repeats(records, subject))
    }

    pub fn summary(&self) -> Result<DatasetSummary> {
        let records = self.dataset.require()?;
        Ok(ops::summary(records))
    }

    pub fn test_stats(&self, test: &str) -> Result<TestStats> {
        let records = self.dataset.require()?;
        ops::test_stats(records, test)
    }

    fn limit_or(&self, requested: Option<usize>, default: usize) -> Result<usize> {
        self.config.effective_limit(Some(requested.unwrap_or(default)))
    }
}
