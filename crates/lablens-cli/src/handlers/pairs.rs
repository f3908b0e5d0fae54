use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::types::PairBy;
use crate::views::PairsView;
use anyhow::Result;
use lablens_types::{ServicePairRow, TestPairRow};

pub fn handle(
    ctx: &ExecutionContext,
    by: PairBy,
    limit: Option<usize>,
    filter: &FilterArgs,
) -> Result<()> {
    let cohort = filter.optional()?;
    let workspace = ctx.workspace()?;
    let pairs = workspace.pairs(by.into(), cohort.as_ref(), limit)?;

    let view = PairsView {
        pairs: &pairs,
        by,
        color: color_enabled(),
    };
    match by {
        PairBy::Test => {
            let rows: Vec<TestPairRow> = pairs.iter().map(TestPairRow::from).collect();
            emit(ctx.format, &rows, view)
        }
        PairBy::Service => {
            let rows: Vec<ServicePairRow> = pairs.iter().map(ServicePairRow::from).collect();
            emit(ctx.format, &rows, view)
        }
    }
}
