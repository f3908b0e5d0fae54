use std::fmt::{self, Display};

use lablens_engine::{CohortStats, DatasetSummary, NumericSummary, Panel, Repeat, TestDistribution};
use lablens_types::{CoOccurrencePair, Matrix, QueryResponse, Record, SubsetResponse};
use owo_colors::OwoColorize;

use crate::output::Table;
use crate::types::PairBy;

fn record_table(records: &[Record], color: bool) -> Table {
    let mut table = Table::new(lablens_loader::EXPECTED_COLUMNS, color);
    for record in records {
        table.push(vec![
            record.subject_id.clone(),
            record.sex.to_string(),
            record.age.map(|a| a.to_string()).unwrap_or_default(),
            record.test_name.clone(),
            record.result_value.to_string(),
            record.service_unit.clone(),
            record.date.to_string(),
        ]);
    }
    table
}

fn headline(f: &mut fmt::Formatter<'_>, text: &str, color: bool) -> fmt::Result {
    if color {
        writeln!(f, "{}", text.bold())
    } else {
        writeln!(f, "{}", text)
    }
}

fn number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

pub struct SubsetView<'a> {
    pub response: &'a SubsetResponse,
    pub color: bool,
}

impl Display for SubsetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.response.records.len();
        let mut line = format!("{} matching records", self.response.rowcount);
        if shown < self.response.rowcount {
            line.push_str(&format!(" (showing first {})", shown));
        }
        headline(f, &line, self.color)?;

        if shown > 0 {
            writeln!(f)?;
            write!(f, "{}", record_table(&self.response.records, self.color))?;
        }
        Ok(())
    }
}

pub struct PageView<'a> {
    pub response: &'a QueryResponse,
    pub offset: usize,
    pub color: bool,
}

impl Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.response.data.len();
        let line = if shown == 0 {
            format!(
                "No records on this page ({} matching, {} in dataset)",
                self.response.filtered, self.response.total
            )
        } else {
            format!(
                "Records {}-{} of {} matching ({} in dataset)",
                self.offset + 1,
                self.offset + shown,
                self.response.filtered,
                self.response.total
            )
        };
        headline(f, &line, self.color)?;

        if shown > 0 {
            writeln!(f)?;
            write!(f, "{}", record_table(&self.response.data, self.color))?;
        }
        Ok(())
    }
}

pub struct PairsView<'a> {
    pub pairs: &'a [CoOccurrencePair],
    pub by: PairBy,
    pub color: bool,
}

impl Display for PairsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pairs.is_empty() {
            return writeln!(f, "No co-occurring pairs");
        }

        let headers = match self.by {
            PairBy::Test => ["test1", "test2", "co_occurrences"],
            PairBy::Service => ["service1", "service2", "freq"],
        };
        let mut table = Table::new(headers, self.color);
        for pair in self.pairs {
            table.push(vec![
                pair.entity_a.clone(),
                pair.entity_b.clone(),
                pair.frequency.to_string(),
            ]);
        }
        write!(f, "{}", table)
    }
}

pub struct MatrixView<'a> {
    pub matrix: &'a Matrix,
    pub color: bool,
}

impl Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matrix.is_empty() {
            return writeln!(f, "No co-occurring pairs");
        }

        let mut table = Table::new(
            std::iter::once(String::new()).chain(self.matrix.axis.iter().cloned()),
            self.color,
        );
        for (name, row) in self.matrix.axis.iter().zip(&self.matrix.cells) {
            let mut cells = vec![name.clone()];
            cells.extend(row.iter().map(u64::to_string));
            table.push(cells);
        }
        write!(f, "{}", table)
    }
}

pub struct PanelsView<'a> {
    pub panels: &'a [Panel],
    pub color: bool,
}

impl Display for PanelsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.panels.is_empty() {
            return writeln!(f, "No panels");
        }

        let mut table = Table::new(["numorden", "Date", "n_tests", "tests_list"], self.color);
        for panel in self.panels {
            table.push(vec![
                panel.subject_id.clone(),
                panel.date.to_string(),
                panel.n_tests.to_string(),
                panel.tests_list(),
            ]);
        }
        write!(f, "{}", table)
    }
}

pub struct RepeatsView<'a> {
    pub repeats: &'a [Repeat],
    pub color: bool,
}

impl Display for RepeatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeats.is_empty() {
            return writeln!(f, "No repeated tests");
        }

        let mut table = Table::new(
            ["numorden", "nombre", "repeat_count", "first_date", "last_date", "days_span"],
            self.color,
        );
        for repeat in self.repeats {
            table.push(vec![
                repeat.subject_id.clone(),
                repeat.test_name.clone(),
                repeat.repeat_count.to_string(),
                repeat.first_date.to_string(),
                repeat.last_date.to_string(),
                repeat.days_span.to_string(),
            ]);
        }
        write!(f, "{}", table)
    }
}

pub struct SummaryView<'a> {
    pub summary: &'a DatasetSummary,
    pub color: bool,
}

impl Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        headline(f, "Dataset summary", self.color)?;
        writeln!(f, "  rows:        {}", s.total_rows)?;
        writeln!(f, "  patients:    {}", s.total_patients)?;
        writeln!(f, "  tests:       {}", s.total_tests)?;
        match s.date_range {
            Some([from, to]) => writeln!(f, "  dates:       {} to {}", from, to)?,
            None => writeln!(f, "  dates:       -")?,
        }
        match s.avg_age {
            Some(age) => writeln!(f, "  mean age:    {}", age)?,
            None => writeln!(f, "  mean age:    -")?,
        }
        writeln!(f, "  missing age: {}", s.missing_age)
    }
}

fn write_numeric(f: &mut fmt::Formatter<'_>, indent: &str, n: &NumericSummary) -> fmt::Result {
    let std = n.std.map(number).unwrap_or_else(|| "-".to_string());
    writeln!(
        f,
        "{}n={}  mean={}  std={}  p25={}  p50={}  p75={}",
        indent,
        n.count,
        number(n.mean),
        std,
        number(n.p25),
        number(n.p50),
        number(n.p75)
    )
}

pub struct CohortStatsView<'a> {
    pub stats: &'a CohortStats,
    pub color: bool,
}

impl Display for CohortStatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        headline(f, &format!("{} rows", self.stats.total_rows), self.color)?;

        for column in &self.stats.columns {
            writeln!(f)?;
            let title = format!("{}  missing={}  unique={}", column.column, column.missing, column.unique);
            if self.color {
                writeln!(f, "{}", title.cyan())?;
            } else {
                writeln!(f, "{}", title)?;
            }
            if let Some(numeric) = &column.numeric {
                write_numeric(f, "  ", numeric)?;
            }
            if let Some(top) = &column.top_values {
                for value in top {
                    writeln!(f, "  {:>6}  {}", value.count, value.value)?;
                }
            }
        }
        Ok(())
    }
}

pub struct TestStatsView<'a> {
    pub stats: &'a TestDistribution,
    pub color: bool,
}

impl Display for TestStatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        headline(
            f,
            &format!("{}: {} results", self.stats.test, self.stats.total),
            self.color,
        )?;
        if let Some(numeric) = &self.stats.numeric_summary {
            write_numeric(f, "  ", numeric)?;
        }
        writeln!(f)?;

        let mut table = Table::new(["value", "count"], self.color);
        for value in &self.stats.values {
            table.push(vec![value.value.clone(), value.count.to_string()]);
        }
        write!(f, "{}", table)
    }
}
