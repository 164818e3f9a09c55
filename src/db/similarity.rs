use std::cmp::Ordering;

use crate::error::{AppError, AppResult};
use crate::models::Neighbor;

/// Square matrix of pairwise similarity scores, stored row-major
///
/// Only ever read one row at a time, so symmetry is not assumed.
#[derive(Debug)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the matrix from its rows, rejecting anything that isn't square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::InvalidData(format!(
                    "Similarity row {} has {} scores, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of `position` against every item, itself included
    pub fn row(&self, position: usize) -> AppResult<&[f64]> {
        if position >= self.size {
            return Err(AppError::IndexOutOfRange {
                position,
                len: self.size,
            });
        }
        let start = position * self.size;
        Ok(&self.scores[start..start + self.size])
    }

    /// The `k` items most similar to `position`, best first
    ///
    /// `position` itself is never part of the result, which holds exactly
    /// `min(k, size - 1)` entries. Equal scores are ordered by ascending
    /// position and NaN scores rank below every number.
    pub fn top_k(&self, position: usize, k: usize) -> AppResult<Vec<Neighbor>> {
        let row = self.row(position)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut neighbors: Vec<Neighbor> = row
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != position)
            .map(|(other, &score)| Neighbor {
                position: other,
                score,
            })
            .collect();

        if k < neighbors.len() {
            // rank_order never returns Equal for distinct positions, so the
            // partition and the sorted prefix match a full sort.
            neighbors.select_nth_unstable_by(k - 1, rank_order);
            neighbors.truncate(k);
        }
        neighbors.sort_by(rank_order);

        Ok(neighbors)
    }
}

/// Descending score, NaN last, ties broken by ascending position
fn rank_order(a: &Neighbor, b: &Neighbor) -> Ordering {
    let by_score = match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    };
    by_score.then_with(|| a.position.cmp(&b.position))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alpha, Beta, Gamma, Delta, Epsilon, Zeta
    fn create_test_matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.9, 0.7, 0.5, 0.1],
            vec![0.9, 1.0, 0.2, 0.3, 0.4, 0.5],
            vec![0.9, 0.2, 1.0, 0.6, 0.6, 0.6],
            vec![0.7, 0.3, 0.6, 1.0, 0.8, 0.0],
            vec![0.5, 0.4, 0.6, 0.8, 1.0, 0.3],
            vec![0.1, 0.5, 0.6, 0.0, 0.3, 1.0],
        ])
        .unwrap()
    }

    fn positions(neighbors: &[Neighbor]) -> Vec<usize> {
        neighbors.iter().map(|n| n.position).collect()
    }

    #[test]
    fn test_top_k_breaks_ties_by_position() {
        let matrix = create_test_matrix();
        let result = matrix.top_k(0, 3).unwrap();

        assert_eq!(positions(&result), vec![1, 2, 3]);
        assert_eq!(result[0].score, 0.9);
        assert_eq!(result[1].score, 0.9);
        assert_eq!(result[2].score, 0.7);
    }

    #[test]
    fn test_top_k_excludes_self() {
        let matrix = create_test_matrix();
        for position in 0..matrix.size() {
            for k in 0..=matrix.size() + 1 {
                let result = matrix.top_k(position, k).unwrap();
                assert!(!positions(&result).contains(&position));
            }
        }
    }

    #[test]
    fn test_top_k_length() {
        let matrix = create_test_matrix();
        for position in 0..matrix.size() {
            for k in 0..=10 {
                let result = matrix.top_k(position, k).unwrap();
                assert_eq!(result.len(), k.min(matrix.size() - 1));
            }
        }
    }

    #[test]
    fn test_top_k_is_sorted() {
        let matrix = create_test_matrix();
        for position in 0..matrix.size() {
            let result = matrix.top_k(position, 5).unwrap();
            for pair in result.windows(2) {
                assert!(
                    pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].position < pair[1].position)
                );
            }
        }
    }

    #[test]
    fn test_top_k_three_way_tie() {
        let matrix = create_test_matrix();
        let result = matrix.top_k(2, 4).unwrap();
        assert_eq!(positions(&result), vec![0, 3, 4, 5]);
    }

    #[test]
    fn test_top_k_zero() {
        let matrix = create_test_matrix();
        assert!(matrix.top_k(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_top_k_larger_than_catalog_returns_all_others() {
        let matrix = create_test_matrix();
        let result = matrix.top_k(0, 100).unwrap();
        assert_eq!(positions(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_top_k_out_of_range() {
        let matrix = create_test_matrix();
        let result = matrix.top_k(6, 3);
        assert!(matches!(
            result,
            Err(AppError::IndexOutOfRange { position: 6, len: 6 })
        ));
    }

    #[test]
    fn test_top_k_nan_sorts_last() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, f64::NAN, 0.2, f64::NAN, 0.8],
            vec![0.0, 1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();

        let result = matrix.top_k(0, 4).unwrap();
        assert_eq!(positions(&result), vec![4, 2, 1, 3]);
        assert!(result[2].score.is_nan());

        let result = matrix.top_k(0, 2).unwrap();
        assert_eq!(positions(&result), vec![4, 2]);
    }

    #[test]
    fn test_top_k_nan_ranks_below_negative_infinity() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![0.0, f64::NAN, f64::NEG_INFINITY],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();

        let result = matrix.top_k(0, 2).unwrap();
        assert_eq!(positions(&result), vec![2, 1]);
    }

    #[test]
    fn test_top_k_reads_only_own_row() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.1, 0.9],
            vec![0.9, 1.0, 0.1],
            vec![0.1, 0.9, 1.0],
        ])
        .unwrap();

        assert_eq!(positions(&matrix.top_k(0, 2).unwrap()), vec![2, 1]);
        assert_eq!(positions(&matrix.top_k(1, 2).unwrap()), vec![0, 2]);
    }

    #[test]
    fn test_top_k_self_not_maximum() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![0.1, 0.5, 0.3],
            vec![0.5, 1.0, 0.2],
            vec![0.3, 0.2, 1.0],
        ])
        .unwrap();

        assert_eq!(positions(&matrix.top_k(0, 1).unwrap()), vec![1]);
    }

    #[test]
    fn test_top_k_single_item_catalog() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert!(matrix.top_k(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_ragged_matrix() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(AppError::InvalidData(_))));
    }

    #[test]
    fn test_from_rows_rejects_non_square_matrix() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5, 0.2], vec![0.5, 1.0, 0.1]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_row() {
        let matrix = create_test_matrix();
        assert_eq!(matrix.row(1).unwrap(), &[0.9, 1.0, 0.2, 0.3, 0.4, 0.5]);
        assert!(matrix.row(6).is_err());
    }
}
