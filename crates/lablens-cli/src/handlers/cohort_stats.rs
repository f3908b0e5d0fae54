use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::views::CohortStatsView;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs) -> Result<()> {
    let cohort = filter.optional()?;
    let workspace = ctx.workspace()?;
    let stats = workspace.cohort_stats(cohort.as_ref())?;

    emit(
        ctx.format,
        &stats,
        CohortStatsView {
            stats: &stats,
            color: color_enabled(),
        },
    )
}
