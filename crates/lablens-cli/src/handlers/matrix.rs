use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::types::PairBy;
use crate::views::MatrixView;
use anyhow::Result;

pub fn handle(
    ctx: &ExecutionContext,
    by: PairBy,
    top: Option<usize>,
    filter: &FilterArgs,
) -> Result<()> {
    let cohort = filter.optional()?;
    let workspace = ctx.workspace()?;
    let matrix = workspace.matrix(by.into(), cohort.as_ref(), top)?;

    emit(
        ctx.format,
        &matrix.to_series(),
        MatrixView {
            matrix: &matrix,
            color: color_enabled(),
        },
    )
}
