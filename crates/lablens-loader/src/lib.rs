// Error types
pub mod error;

// Source abstraction
pub mod traits;

// Source implementations
pub mod csv_source;
pub mod json_source;

// Row cleaning rules shared by every source
pub mod clean;

// Source registry
pub mod registry;

pub use csv_source::{load_csv, read_csv};
pub use error::{Error, Result};
pub use json_source::{load_json, read_json};
pub use registry::{detect_source, load, source_names};
pub use traits::{LoadOptions, LoadReport, RecordSource, SkippedRow};

/// Columns every record source must provide
pub const EXPECTED_COLUMNS: [&str; 7] = [
    "numorden", "sexo", "edad", "nombre", "textores", "nombre2", "Date",
];
