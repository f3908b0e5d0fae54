use super::args::{Cli, Commands};
use super::context::ExecutionContext;
use super::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.data_dir.as_deref(), cli.data, cli.format)?;

    match cli.command {
        Commands::Init { force } => handlers::init::handle(&ctx, force),

        Commands::Query {
            filter,
            limit,
            offset,
            sort,
            order,
        } => handlers::query::handle(&ctx, &filter, limit, offset, sort.as_deref(), order),

        Commands::Subset { filter, limit } => handlers::subset::handle(&ctx, &filter, limit),

        Commands::Pairs { by, limit, filter } => handlers::pairs::handle(&ctx, by, limit, &filter),

        Commands::Matrix { by, top, filter } => handlers::matrix::handle(&ctx, by, top, &filter),

        Commands::Panels { subject } => handlers::panels::handle(&ctx, subject.as_deref()),

        Commands::Repeats { subject } => handlers::repeats::handle(&ctx, subject.as_deref()),

        Commands::Stats => handlers::stats::handle(&ctx),

        Commands::CohortStats { filter } => handlers::cohort_stats::handle(&ctx, &filter),

        Commands::Test { name } => handlers::test::handle(&ctx, &name),

        Commands::Export {
            what,
            output,
            as_format,
            limit,
            subject,
            filter,
        } => handlers::export::handle(
            &ctx,
            handlers::export::ExportRequest {
                what,
                output,
                format: as_format,
                limit,
                subject,
                filter,
            },
        ),
    }
}
