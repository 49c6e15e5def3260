use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Errors surfaced by the scoring core.
///
/// `InvalidInput` is the only condition the core raises itself; it signals a
/// contract violation by a collaborator (e.g. a misbehaving embedder), not bad
/// user input. Embedder failures pass through unchanged.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}
