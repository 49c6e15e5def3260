//! Embedding backends: map a batch of sentences to L2-normalised dense vectors.
//!
//! The scoring core depends only on the `Embedder` trait. Two backends exist:
//! `HashEmbedder` (in-process feature hashing, deterministic, the default) and
//! `RemoteEmbedder` (an OpenAI-compatible `/embeddings` endpoint).
//!
//! The pipeline holds an `Arc<dyn Embedder>` chosen at startup via `EMBEDDER_BACKEND`.

pub mod hash;
pub mod remote;

use thiserror::Error;

pub use hash::HashEmbedder;
pub use remote::RemoteEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding API unavailable after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// Ordered rows of embedding vectors, one per input sentence.
///
/// Rows are kept as-is; shape validation (empty, ragged, width mismatch) belongs
/// to the consumer that needs a rectangular matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingMatrix {
    rows: Vec<Vec<f32>>,
}

impl EmbeddingMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Text → normalised vector function, treated as a black box by the scoring core.
///
/// Implementations must be deterministic, keep a constant dimension for the
/// lifetime of the process, and return unit-norm rows so that cosine similarity
/// reduces to a dot product. Empty strings must still produce a row.
pub trait Embedder: Send + Sync {
    /// Backend label ("hash", "remote"), surfaced on `/health`.
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    /// Encodes `texts` in order. May block; call from a blocking context.
    fn encode(&self, texts: &[String]) -> Result<EmbeddingMatrix, EmbeddingError>;
}

/// Scales `vector` to unit length in place. Zero vectors are left untouched.
pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
