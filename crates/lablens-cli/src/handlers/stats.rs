use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::views::SummaryView;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let workspace = ctx.workspace()?;
    let summary = workspace.summary()?;

    emit(
        ctx.format,
        &summary,
        SummaryView {
            summary: &summary,
            color: color_enabled(),
        },
    )
}
