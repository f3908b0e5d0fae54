use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::views::PanelsView;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, subject: Option<&str>) -> Result<()> {
    let workspace = ctx.workspace()?;
    let panels = workspace.panels(subject)?;

    emit(
        ctx.format,
        &panels,
        PanelsView {
            panels: &panels,
            color: color_enabled(),
        },
    )
}
