use anyhow::{Context, Result};
use clap::Args;
use lablens_types::{CohortFilter, FilterCondition, FilterRequest, Logic};
use std::path::PathBuf;

/// Cohort selection shared by every command that filters records
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "conditions",
        help = "JSON filter file: {\"conditions\": [{\"field\", \"operator\", \"value\"}], \"logic\": \"AND\"}"
    )]
    pub filter: Option<PathBuf>,

    #[arg(
        long = "where",
        value_name = "EXPR",
        help = "Condition '<field> <op> <value>', e.g. 'age gte 40' (repeatable)"
    )]
    pub conditions: Vec<String>,

    #[arg(long, conflicts_with = "filter", help = "Match any --where condition instead of all")]
    pub or: bool,
}

impl FilterArgs {
    pub fn is_empty(&self) -> bool {
        self.filter.is_none() && self.conditions.is_empty()
    }

    /// Build the filter; no conditions is an error
    pub fn require(&self) -> Result<CohortFilter> {
        if let Some(path) = &self.filter {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read filter file {}", path.display()))?;
            let request: FilterRequest = serde_json::from_str(&content)
                .with_context(|| format!("Invalid filter file {}", path.display()))?;
            return Ok(CohortFilter::try_from(request)?);
        }

        let conditions = self
            .conditions
            .iter()
            .map(|expr| FilterCondition::parse_expr(expr))
            .collect::<lablens_types::Result<Vec<_>>>()?;
        let logic = if self.or { Logic::Or } else { Logic::And };
        Ok(CohortFilter::new(conditions, logic)?)
    }

    /// Build the filter when one was given
    pub fn optional(&self) -> Result<Option<CohortFilter>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.require().map(Some)
    }
}
