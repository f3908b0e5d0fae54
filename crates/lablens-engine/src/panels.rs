use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use lablens_types::Record;
use serde::{Deserialize, Serialize};

/// All tests ordered for one subject on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(rename = "numorden")]
    pub subject_id: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Result rows on that day, duplicates included
    pub n_tests: usize,
    /// Distinct test names, sorted
    pub tests: Vec<String>,
}

impl Panel {
    pub fn tests_list(&self) -> String {
        self.tests.join(",")
    }
}

/// One test performed for one subject on more than one distinct day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    #[serde(rename = "numorden")]
    pub subject_id: String,
    #[serde(rename = "nombre")]
    pub test_name: String,
    pub repeat_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub days_span: i64,
}

/// Panels for every subject-day, ordered by subject then date
pub fn panels(records: &[Record]) -> Vec<Panel> {
    collect_panels(records.iter())
}

pub fn panels_for(records: &[Record], subject: &str) -> Vec<Panel> {
    collect_panels(records.iter().filter(|r| r.subject_id == subject))
}

fn collect_panels<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<Panel> {
    let mut grouped: BTreeMap<(&str, NaiveDate), (usize, BTreeSet<&str>)> = BTreeMap::new();

    for record in records {
        let entry = grouped
            .entry((record.subject_id.as_str(), record.date))
            .or_default();
        entry.0 += 1;
        entry.1.insert(record.test_name.as_str());
    }

    grouped
        .into_iter()
        .map(|((subject, date), (n_tests, tests))| Panel {
            subject_id: subject.to_string(),
            date,
            n_tests,
            tests: tests.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Tests repeated across days, most repeated first
pub fn repeats(records: &[Record]) -> Vec<Repeat> {
    collect_repeats(records.iter())
}

pub fn repeats_for(records: &[Record], subject: &str) -> Vec<Repeat> {
    collect_repeats(records.iter().filter(|r| r.subject_id == subject))
}

fn collect_repeats<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<Repeat> {
    let mut dates: BTreeMap<(&str, &str), BTreeSet<NaiveDate>> = BTreeMap::new();

    for record in records {
        dates
            .entry((record.subject_id.as_str(), record.test_name.as_str()))
            .or_default()
            .insert(record.date);
    }

    let mut repeats: Vec<Repeat> = dates
        .into_iter()
        .filter(|(_, days)| days.len() > 1)
        .filter_map(|((subject, test), days)| {
            let first_date = *days.first()?;
            let last_date = *days.last()?;
            Some(Repeat {
                subject_id: subject.to_string(),
                test_name: test.to_string(),
                repeat_count: days.len(),
                first_date,
                last_date,
                days_span: (last_date - first_date).num_days() + 1,
            })
        })
        .collect();

    // BTreeMap order already sorts by subject/test; the stable sort keeps it for ties
    repeats.sort_by(|a, b| {
        b.repeat_count
            .cmp(&a.repeat_count)
            .then_with(|| b.days_span.cmp(&a.days_span))
    });
    repeats
}

#[cfg(test)]
mod tests {
    use super::*;
    use lablens_types::{ResultValue, Sex};

    fn row(subject: &str, day: u32, test: &str) -> Record {
        Record {
            subject_id: subject.to_string(),
            sex: Sex::Female,
            age: Some(70),
            test_name: test.to_string(),
            result_value: ResultValue::Number(1.0),
            service_unit: "MEDICINA INTERNA".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
        }
    }

    #[test]
    fn test_panels_group_subject_day() {
        let records = vec![
            row("P2", 1, "GLU"),
            row("P1", 3, "HB"),
            row("P1", 3, "GLU"),
            row("P1", 3, "GLU"),
            row("P1", 1, "K"),
        ];
        let panels = panels(&records);

        assert_eq!(panels.len(), 3);
        assert_eq!(panels[0].subject_id, "P1");
        assert_eq!(panels[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(panels[1].n_tests, 3);
        assert_eq!(panels[1].tests_list(), "GLU,HB");
        assert_eq!(panels[2].subject_id, "P2");

        assert_eq!(panels_for(&records, "P2").len(), 1);
        assert!(panels_for(&records, "P9").is_empty());
    }

    #[test]
    fn test_repeats_need_distinct_days() {
        let records = vec![
            row("P1", 1, "GLU"),
            row("P1", 1, "GLU"),
            row("P1", 1, "HB"),
            row("P1", 5, "HB"),
            row("P2", 1, "K"),
            row("P2", 2, "K"),
            row("P2", 9, "K"),
        ];
        let repeats = repeats(&records);

        assert_eq!(repeats.len(), 2);
        assert_eq!(repeats[0].test_name, "K");
        assert_eq!(repeats[0].repeat_count, 3);
        assert_eq!(repeats[0].days_span, 9);
        assert_eq!(repeats[1].test_name, "HB");
        assert_eq!(repeats[1].repeat_count, 2);
        assert_eq!(repeats[1].days_span, 5);

        assert_eq!(repeats_for(&records, "P1").len(), 1);
    }
}
