use std::collections::HashMap;

use lablens_types::{CoOccurrencePair, Matrix, PairKey};

/// Lay out pairwise frequencies as a symmetric matrix.
///
/// The axis holds every entity seen in `pairs`, ordered by total frequency
/// (descending) with ties broken by name. Cells come from a canonical-key
/// map, so `(A, B)` and `(B, A)` inputs land in the same cell and the
/// result is symmetric by construction. The diagonal is always zero.
/// Pairs with a frequency of zero are ignored.
pub fn build(pairs: &[CoOccurrencePair]) -> Matrix {
    let mut frequencies: HashMap<PairKey, u64> = HashMap::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();

    for pair in pairs.iter().filter(|pair| pair.frequency > 0) {
        *frequencies.entry(pair.key()).or_insert(0) += pair.frequency;
        *totals.entry(pair.entity_a.as_str()).or_insert(0) += pair.frequency;
        if pair.entity_b != pair.entity_a {
            *totals.entry(pair.entity_b.as_str()).or_insert(0) += pair.frequency;
        }
    }

    let mut axis: Vec<&str> = totals.keys().copied().collect();
    axis.sort_by(|a, b| totals[b].cmp(&totals[a]).then_with(|| a.cmp(b)));

    let index: HashMap<&str, usize> = axis.iter().enumerate().map(|(i, name)| (*name, i)).collect();
    let mut cells = vec![vec![0u64; axis.len()]; axis.len()];

    for (key, frequency) in &frequencies {
        if key.is_self_pair() {
            continue;
        }
        let i = index[key.first()];
        let j = index[key.second()];
        cells[i][j] = *frequency;
        cells[j][i] = *frequency;
    }

    tracing::debug!(entities = axis.len(), pairs = frequencies.len(), "built matrix");

    Matrix {
        axis: axis.into_iter().map(str::to_string).collect(),
        cells,
    }
}

/// Keep only the first `top` axis entries and their sub-matrix
pub fn truncate_axis(matrix: Matrix, top: usize) -> Matrix {
    if matrix.len() <= top {
        return matrix;
    }

    let Matrix { mut axis, cells } = matrix;
    axis.truncate(top);
    let cells = cells
        .into_iter()
        .take(top)
        .map(|mut row| {
            row.truncate(top);
            row
        })
        .collect();

    Matrix { axis, cells }
}
