use crate::error::{AppError, AppResult};

use super::similarity::SimilarityMatrix;

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 10;

/// Ranks every other item against `row`, most similar first
///
/// The sort is stable, so equal scores keep ascending item order. The query row
/// is excluded by index, which also holds for a zero-vector query whose
/// self-similarity is 0.
pub fn rank(matrix: &SimilarityMatrix, row: usize) -> Vec<(usize, f64)> {
    let mut scores: Vec<(usize, f64)> = matrix
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(j, _)| j != row)
        .collect();

    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
}

/// Takes the top `n` entries of the ranking for `row`
///
/// With `strict_count` a catalogue holding fewer than `n` other items fails with
/// `InsufficientData`; otherwise the shorter list is returned.
pub fn top_n(
    matrix: &SimilarityMatrix,
    row: usize,
    n: usize,
    strict_count: bool,
) -> AppResult<Vec<(usize, f64)>> {
    let mut ranked = rank(matrix, row);

    if strict_count && ranked.len() < n {
        return Err(AppError::InsufficientData {
            requested: n,
            available: ranked.len(),
        });
    }

    ranked.truncate(n);
    Ok(ranked)
}
