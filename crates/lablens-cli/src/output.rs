use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::fmt::{self, Display};

/// Print `data` as pretty JSON, or `view` as plain text.
pub fn emit<T, V>(format: OutputFormat, data: &T, view: V) -> Result<()>
where
    T: Serialize + ?Sized,
    V: Display,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Plain => print!("{}", view),
    }
    Ok(())
}

/// Colors only when stdout is a terminal and NO_COLOR is unset
pub fn color_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Left-aligned text table with a header row
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    color: bool,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>, color: bool) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            color,
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use owo_colors::OwoColorize;

        let widths = self.widths();
        let last = widths.len().saturating_sub(1);

        for (i, header) in self.headers.iter().enumerate() {
            let cell = pad(header, widths[i], i == last);
            if self.color {
                write!(f, "{}", cell.bold())?;
            } else {
                f.write_str(&cell)?;
            }
            if i != last {
                f.write_str("  ")?;
            }
        }
        writeln!(f)?;

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = widths.get(i).copied().unwrap_or(0);
                f.write_str(&pad(cell, width, i == last))?;
                if i != last {
                    f.write_str("  ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn pad(text: &str, width: usize, last: bool) -> String {
    if last {
        return text.to_string();
    }
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}
