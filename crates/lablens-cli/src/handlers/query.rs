use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::output::{color_enabled, emit};
use crate::types::SortDirection;
use crate::views::PageView;
use anyhow::Result;
use lablens_engine::Sort;
use lablens_runtime::QueryOptions;
use lablens_types::Field;

pub fn handle(
    ctx: &ExecutionContext,
    filter: &FilterArgs,
    limit: Option<usize>,
    offset: usize,
    sort: Option<&str>,
    order: SortDirection,
) -> Result<()> {
    let filter = filter.require()?;
    let field = match sort {
        Some(name) => name.parse::<Field>()?,
        None => Sort::default().field,
    };
    let options = QueryOptions {
        limit,
        offset,
        sort: Sort {
            field,
            order: order.into(),
        },
    };

    let workspace = ctx.workspace()?;
    let response = workspace.query_page(&filter, &options)?;

    emit(
        ctx.format,
        &response,
        PageView {
            response: &response,
            offset,
            color: color_enabled(),
        },
    )
}
