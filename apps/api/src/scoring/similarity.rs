//! Semantic coverage: how well the target sentences cover each source sentence.
//!
//! Directional on purpose: source = job description (requirements), target =
//! résumé (candidate content). Swapping the arguments measures something else.

use crate::embedding::EmbeddingMatrix;
use crate::scoring::error::ScoringError;

/// Mean over source rows of the best cosine similarity against any target row,
/// clamped to [0, 1].
///
/// Fails with `InvalidInput` when either matrix is empty, has zero-width or
/// ragged rows, or the two widths differ.
pub fn average_max_cosine_similarity(
    source: &EmbeddingMatrix,
    target: &EmbeddingMatrix,
) -> Result<f64, ScoringError> {
    let source_dim = validate_matrix("source", source)?;
    let target_dim = validate_matrix("target", target)?;

    if source_dim != target_dim {
        return Err(ScoringError::InvalidInput(format!(
            "embedding dimension mismatch: source has {source_dim} dimensions, \
             target has {target_dim} dimensions"
        )));
    }

    let total: f64 = source
        .rows()
        .iter()
        .map(|s| {
            target
                .rows()
                .iter()
                .map(|t| cosine_similarity(s, t))
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .sum();

    let mean = total / source.len() as f64;
    Ok(mean.clamp(0.0, 1.0))
}

/// Cosine similarity in [-1, 1]. A zero vector is orthogonal to everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Returns the row width of a non-empty rectangular matrix.
fn validate_matrix(name: &str, matrix: &EmbeddingMatrix) -> Result<usize, ScoringError> {
    let first = matrix.rows().first().ok_or_else(|| {
        ScoringError::InvalidInput(format!(
            "{name} embeddings are empty; need at least one sentence"
        ))
    })?;

    let dim = first.len();
    if dim == 0 {
        return Err(ScoringError::InvalidInput(format!(
            "{name} embeddings have zero width"
        )));
    }

    if let Some((i, row)) = matrix
        .rows()
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != dim)
    {
        return Err(ScoringError::InvalidInput(format!(
            "{name} embeddings are not two-dimensional: row {i} has {} values, expected {dim}",
            row.len()
        )));
    }

    Ok(dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: &[&[f32]]) -> EmbeddingMatrix {
        EmbeddingMatrix::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_identical_matrices_score_one() {
        let m = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let score = average_max_cosine_similarity(&m, &m).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_takes_best_match_per_source_row_then_averages() {
        // Row 0 is fully covered, row 1 is orthogonal to every target row.
        let source = matrix(&[&[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]]);
        let target = matrix(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]]);
        let score = average_max_cosine_similarity(&source, &target).unwrap();
        assert!((score - 0.5).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_direction_matters() {
        // One requirement, covered by one of two résumé sentences.
        let jd = matrix(&[&[1.0, 0.0]]);
        let resume = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let forward = average_max_cosine_similarity(&jd, &resume).unwrap();
        let backward = average_max_cosine_similarity(&resume, &jd).unwrap();
        assert!((forward - 1.0).abs() < 1e-9);
        assert!((backward - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_similarity_clamps_to_zero() {
        let source = matrix(&[&[1.0, 0.0]]);
        let target = matrix(&[&[-1.0, 0.0]]);
        assert_eq!(average_max_cosine_similarity(&source, &target).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_matrix_is_invalid() {
        let empty = EmbeddingMatrix::default();
        let m = matrix(&[&[1.0]]);
        assert!(matches!(
            average_max_cosine_similarity(&empty, &m),
            Err(ScoringError::InvalidInput(_))
        ));
        assert!(matches!(
            average_max_cosine_similarity(&m, &empty),
            Err(ScoringError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_one_by_zero_matrix_is_invalid() {
        let zero_width = EmbeddingMatrix::new(vec![vec![]]);
        let m = matrix(&[&[1.0]]);
        assert!(matches!(
            average_max_cosine_similarity(&zero_width, &m),
            Err(ScoringError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ragged_matrix_is_invalid() {
        let ragged = matrix(&[&[1.0, 0.0], &[1.0]]);
        let m = matrix(&[&[1.0, 0.0]]);
        let err = average_max_cosine_similarity(&m, &ragged).unwrap_err();
        assert!(err.to_string().contains("not two-dimensional"));
    }

    #[test]
    fn test_dimension_mismatch_is_invalid() {
        let a = matrix(&[&[1.0, 0.0]]);
        let b = matrix(&[&[1.0, 0.0, 0.0]]);
        let err = average_max_cosine_similarity(&a, &b).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[test]
    fn test_cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    fn arb_matrix(rows: usize, dim: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
        prop::collection::vec(prop::collection::vec(-1.0_f32..1.0, dim), 1..=rows)
    }

    proptest! {
        #[test]
        fn prop_invariant_to_target_row_order(
            source in arb_matrix(4, 5),
            target in arb_matrix(6, 5),
        ) {
            let mut reversed = target.clone();
            reversed.reverse();

            let s = EmbeddingMatrix::new(source);
            let a = average_max_cosine_similarity(&s, &EmbeddingMatrix::new(target)).unwrap();
            let b = average_max_cosine_similarity(&s, &EmbeddingMatrix::new(reversed)).unwrap();
            prop_assert!((a - b).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&a));
        }
    }
}
