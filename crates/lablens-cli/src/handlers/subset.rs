use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::views::SubsetView;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs, limit: Option<usize>) -> Result<()> {
    let filter = filter.require()?;
    let workspace = ctx.workspace()?;
    let response = workspace.subset(&filter, limit)?;

    emit(
        ctx.format,
        &response,
        SubsetView {
            response: &response,
            color: color_enabled(),
        },
    )
}
