mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod output;
pub mod types;
mod views;

pub use args::{Cli, Commands, FilterArgs};
pub use commands::run;
pub use logging::init_logging;
