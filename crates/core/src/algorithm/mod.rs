//! Token-level edit distance
//!
//! Implements the optimal string alignment (OSA) distance: Levenshtein
//! distance extended with non-overlapping adjacent transpositions, unit
//! cost per operation, computed over tokens rather than characters. The
//! full cost matrix is exposed for backtracking; a rolling three-row
//! variant serves distance-only queries.
pub mod osa;

pub use osa::{cost_matrix, edit_distance};

/// The (m+1)x(n+1) dynamic-programming table for one distance computation.
///
/// Owned exclusively by the computation call and discarded after
/// backtracking. Row 0 and column 0 hold the base cases.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl CostMatrix {
    /// Create a matrix with base cases `cost[i][0] = i`, `cost[0][j] = j`.
    pub(crate) fn with_base_cases(rows: usize, cols: usize) -> Self {
        let mut matrix = Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        };
        for i in 0..rows {
            matrix.set(i, 0, i);
        }
        for j in 0..cols {
            matrix.set(0, j, j);
        }
        matrix
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }

    /// Number of rows (reference length + 1).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (candidate length + 1).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The edit distance this matrix encodes (bottom-right cell).
    pub fn distance(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Strip the common prefix and suffix of two sequences.
///
/// Equal leading and trailing tokens contribute no cost and cannot take
/// part in a cheaper transposition, so trimming them never changes the
/// distance.
pub(crate) fn trim_common_affixes<'a, T: PartialEq>(
    a: &'a [T],
    b: &'a [T],
) -> (&'a [T], &'a [T]) {
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[prefix..], &b[prefix..]);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cases() {
        let matrix = CostMatrix::with_base_cases(4, 3);
        assert_eq!(matrix.get(3, 0), 3);
        assert_eq!(matrix.get(0, 2), 2);
        assert_eq!(matrix.get(0, 0), 0);
    }

    #[test]
    fn test_trim_affixes() {
        let a = vec!["the", "cat", "sat", "down"];
        let b = vec!["the", "dog", "sat", "down"];
        let (ta, tb) = trim_common_affixes(&a, &b);
        assert_eq!(ta, &["cat"]);
        assert_eq!(tb, &["dog"]);
    }

    #[test]
    fn test_trim_identical_sequences() {
        let a = vec!["x", "y"];
        let b = vec!["x", "y"];
        let (ta, tb) = trim_common_affixes(&a, &b);
        assert!(ta.is_empty());
        assert!(tb.is_empty());
    }

    #[test]
    fn test_trim_disjoint_sequences() {
        let a = vec!["x", "y"];
        let b = vec!["p", "q", "r"];
        let (ta, tb) = trim_common_affixes(&a, &b);
        assert_eq!(ta.len(), 2);
        assert_eq!(tb.len(), 3);
    }
}
