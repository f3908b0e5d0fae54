use std::path::Path;

use crate::csv_source::CsvSource;
use crate::json_source::JsonSource;
use crate::traits::{LoadOptions, LoadReport, RecordSource};
use crate::{Error, Result};

/// Get all available record sources
pub fn get_all_sources() -> Vec<Box<dyn RecordSource>> {
    vec![Box::new(CsvSource), Box::new(JsonSource)]
}

/// Get the IDs of all available record sources
pub fn source_names() -> Vec<&'static str> {
    get_all_sources().iter().map(|s| s.id()).collect()
}

/// Find the source that can read the given file
pub fn detect_source(path: &Path) -> Option<Box<dyn RecordSource>> {
    get_all_sources().into_iter().find(|s| s.probe(path))
}

/// Load and clean every record in the file
pub fn load(path: &Path, options: &LoadOptions) -> Result<LoadReport> {
    let source = detect_source(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();
        Error::UnsupportedFormat(ext)
    })?;

    let report = source.load(path, options)?;
    tracing::info!(
        path = %path.display(),
        source = source.id(),
        loaded = report.loaded(),
        skipped = report.skipped.len(),
        "records loaded"
    );
    Ok(report)
}
