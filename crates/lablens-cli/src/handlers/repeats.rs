use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::views::RepeatsView;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, subject: Option<&str>) -> Result<()> {
    let workspace = ctx.workspace()?;
    let repeats = workspace.repeats(subject)?;

    emit(
        ctx.format,
        &repeats,
        RepeatsView {
            repeats: &repeats,
            color: color_enabled(),
        },
    )
}
