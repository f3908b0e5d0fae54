pub mod config;
pub mod dataset;
pub mod error;
pub mod ops;
pub mod workspace;

pub use config::{resolve_data_dir, Config};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use ops::{QueryOptions, TestStats};
pub use workspace::{InitOutcome, Workspace};
