use lablens_engine::{panels as engine_panels, Panel, Repeat};
use lablens_types::Record;

pub fn panels(records: &[Record], subject: Option<&str>) -> Vec<Panel> {
    match subject {
        Some(subject) => engine_panels::panels_for(records, subject),
        None => engine_panels::panels(records),
    }
}

pub fn repeats(records: &[Record], subject: Option<&str>) -> Vec<Repeat> {
    match subject {
        Some(subject) => engine_panels::repeats_for(records, subject),
        None => engine_panels::repeats(records),
    }
}
