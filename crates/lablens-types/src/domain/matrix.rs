use serde::{Deserialize, Serialize};

/// Symmetric co-occurrence matrix laid out along an ordered axis.
///
/// `cells[i][j] == cells[j][i]` and `cells[i][i] == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Matrix {
    pub axis: Vec<String>,
    pub cells: Vec<Vec<u64>>,
}

impl Matrix {
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    pub fn position(&self, entity: &str) -> Option<usize> {
        self.axis.iter().position(|name| name == entity)
    }

    /// Cell for two entity names; `None` when either is not on the axis
    pub fn cell(&self, a: &str, b: &str) -> Option<u64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.cells.get(i)?.get(j).copied()
    }

    /// Row-per-entity shape consumed by heatmap charts
    pub fn to_series(&self) -> MatrixSeries {
        let series = self
            .axis
            .iter()
            .zip(&self.cells)
            .map(|(name, row)| SeriesRow {
                name: name.clone(),
                data: row.clone(),
            })
            .collect();

        MatrixSeries {
            axis: self.axis.clone(),
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSeries {
    pub axis: Vec<String>,
    pub series: Vec<SeriesRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub name: String,
    pub data: Vec<u64>,
}
