use serde::{Deserialize, Serialize};

/// The sole output of one evaluation. Field names are the public JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub fit_score: f64,                 // 0 – 100
    pub semantic_similarity_score: f64, // 0 – 1
    pub matched_skills: Vec<String>,    // sorted ascending
    pub missing_skills: Vec<String>,    // sorted ascending
    pub experience_match_score: f64,    // 0 – 1
    pub explanation: String,
}

/// Text-only evaluation request for callers that already hold the résumé text.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub resume_text: String,
    pub job_description_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ml_model_loaded: bool,
    pub version: String,
    pub embedder: String,
    pub skill_strategy: String,
}
