use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use crate::clean::{clean_row, RawRow};
use crate::traits::{LoadOptions, LoadReport, RecordSource, SkippedRow};
use crate::{Error, Result, EXPECTED_COLUMNS};

pub struct CsvSource;

impl RecordSource for CsvSource {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn probe(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }

    fn load(&self, path: &Path, options: &LoadOptions) -> Result<LoadReport> {
        let file = File::open(path)?;
        read_csv(file, options)
    }
}

/// Load a CSV file from disk
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<LoadReport> {
    CsvSource.load(path, options)
}

/// Read records from CSV text with a header row.
///
/// Columns may appear in any order and extra columns are ignored. Cells
/// that are not valid UTF-8 are decoded as Latin-1, which is how laboratory
/// exports are commonly encoded.
pub fn read_csv<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.byte_headers()?.clone();
    let positions = column_positions(&headers)?;

    let mut report = LoadReport::default();
    let mut row = ByteRecord::new();

    while reader.read_byte_record(&mut row)? {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cells: Vec<Cow<'_, str>> = positions
            .iter()
            .map(|&idx| decode(row.get(idx).unwrap_or_default()))
            .collect();

        let raw = RawRow {
            numorden: &cells[0],
            sexo: &cells[1],
            edad: &cells[2],
            nombre: &cells[3],
            textores: &cells[4],
            nombre2: &cells[5],
            date: &cells[6],
        };

        match clean_row(&raw, options) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::debug!(line, %reason, "skipping row");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    Ok(report)
}

/// Index of each expected column in the header, in `EXPECTED_COLUMNS` order
fn column_positions(headers: &ByteRecord) -> Result<Vec<usize>> {
    let names: Vec<Cow<'_, str>> = headers.iter().map(decode).collect();

    EXPECTED_COLUMNS
        .iter()
        .map(|expected| {
            names
                .iter()
                .position(|name| name.trim().trim_start_matches('\u{feff}') == *expected)
                .ok_or_else(|| Error::MissingColumn(expected.to_string()))
        })
        .collect()
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}
