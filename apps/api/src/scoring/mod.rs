// Scoring core: sentence splitting, semantic coverage, skill matching,
// experience alignment, weighted fit score, explanation, orchestration.
// Pure, synchronous computation; the only collaborator is the injected Embedder.

pub mod error;
pub mod experience;
pub mod explanation;
pub mod final_score;
pub mod pipeline;
pub mod sentences;
pub mod similarity;
pub mod skills;
pub mod vocabulary;

pub use error::ScoringError;
pub use pipeline::{FitPipeline, ScoringConfig};
