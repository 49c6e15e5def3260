use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{l2_normalize, Embedder, EmbeddingError, EmbeddingMatrix};

/// Fixed seed so embeddings are stable across runs and Rust versions.
/// Changing these keys changes every vector the service produces.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

const UNIGRAM_WEIGHT: f32 = 1.0;
const BIGRAM_WEIGHT: f32 = 0.5;

/// Hashed in place of the tokens of an empty sentence so its row stays unit-norm.
const EMPTY_SENTINEL: &str = "<empty>";

/// Deterministic feature-hashing embedder.
///
/// - No model download, no training
/// - O(n) in the number of tokens
/// - Word unigrams and adjacent bigrams, signed buckets, L2-normalised
///
/// Lexical rather than semantic: "python developer" and "python engineer" are
/// close, "python" and "programming language" are not.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let h = self.hash(feature);
        let idx = (h % self.dimension as u64) as usize;
        // High bit picks the sign so collisions cancel out on average.
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        vector[idx] += sign * weight;
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let tokens = tokenize(text);

        if tokens.is_empty() {
            self.add_feature(&mut vector, EMPTY_SENTINEL, UNIGRAM_WEIGHT);
        } else {
            for token in &tokens {
                self.add_feature(&mut vector, token, UNIGRAM_WEIGHT);
            }
            for pair in tokens.windows(2) {
                self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
            }
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, texts: &[String]) -> Result<EmbeddingMatrix, EmbeddingError> {
        Ok(EmbeddingMatrix::new(
            texts.iter().map(|t| self.embed_one(t)).collect(),
        ))
    }
}

/// Lowercased alphanumeric tokens; `+` is kept so "c++" survives.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
