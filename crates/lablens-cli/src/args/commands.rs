use super::common::FilterArgs;
use crate::types::{ExportFormat, ExportTarget, PairBy, SortDirection};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Page through records matching a cohort filter")]
    Query {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Rows per page [default: default_limit from config]")]
        limit: Option<usize>,

        #[arg(long, default_value = "0")]
        offset: usize,

        #[arg(long, value_name = "FIELD", help = "Field to sort by [default: Date]")]
        sort: Option<String>,

        #[arg(long, default_value = "desc")]
        order: SortDirection,
    },

    #[command(about = "Matching records in dataset order with the total match count")]
    Subset {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Maximum records returned [default: 10000]")]
        limit: Option<usize>,
    },

    #[command(about = "Most frequent pairs ordered for the same subject on the same day")]
    Pairs {
        #[arg(long, default_value = "test")]
        by: PairBy,

        #[arg(long, help = "Maximum pairs returned [default: 50]")]
        limit: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Symmetric co-occurrence matrix")]
    Matrix {
        #[arg(long, default_value = "test")]
        by: PairBy,

        #[arg(long, help = "Keep only the N most frequent entities [default: matrix_top from config]")]
        top: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Tests ordered per subject per day")]
    Panels {
        #[arg(long, help = "Only this subject (numorden)")]
        subject: Option<String>,
    },

    #[command(about = "Tests repeated for a subject on different days")]
    Repeats {
        #[arg(long, help = "Only this subject (numorden)")]
        subject: Option<String>,
    },

    #[command(about = "Dataset summary")]
    Stats,

    #[command(about = "Per-column statistics for a cohort (or the whole dataset)")]
    CohortStats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Result distribution for one test")]
    Test {
        #[arg(help = "Test name (nombre), matched exactly")]
        name: String,
    },

    #[command(about = "Write a subset or panels to a file")]
    Export {
        #[arg(long, default_value = "subset")]
        what: ExportTarget,

        #[arg(long, short)]
        output: PathBuf,

        #[arg(long = "as", value_name = "FORMAT", default_value = "csv")]
        as_format: ExportFormat,

        #[arg(long, help = "Maximum records exported (subset only)")]
        limit: Option<usize>,

        #[arg(long, help = "Only this subject (panels only)")]
        subject: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Write a default config.toml to the data directory")]
    Init {
        #[arg(long, help = "Overwrite an existing config.toml")]
        force: bool,
    },
}
