mod commands;
mod common;

pub use commands::*;
pub use common::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lablens")]
#[command(about = "Filter laboratory result cohorts and analyze test co-occurrence", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Data directory holding config.toml [default: $LABLENS_PATH or the XDG data dir]"
    )]
    pub data_dir: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Record file to load (.csv or .json), overrides data_path from config"
    )]
    pub data: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
