//! Skill extraction and matching: pluggable, trait-based.
//!
//! Three strategies share one `SkillMatcher` trait; exactly one is active per
//! deployment (`SKILL_MATCH_STRATEGY`):
//! - `SubstringSkillMatcher` (default): literal vocabulary lookup
//! - `CategoryWeightedSkillMatcher`: same sets, overlap weighted by category
//! - `SemanticSkillMatcher`: literal lookup plus phrase-embedding detection
//!
//! Every strategy treats a JD without vocabulary skills as "no requirements":
//! `([], [], 1.0)`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingMatrix};
use crate::scoring::error::ScoringError;
use crate::scoring::similarity::cosine_similarity;
use crate::scoring::vocabulary::{SkillCategory, SkillVocabulary};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of comparing résumé skills to JD requirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub matched: Vec<String>, // sorted ascending
    pub missing: Vec<String>, // sorted ascending
    pub overlap_ratio: f64,   // 0.0 – 1.0
}

impl SkillMatch {
    fn no_requirements() -> Self {
        Self {
            matched: vec![],
            missing: vec![],
            overlap_ratio: 1.0,
        }
    }
}

/// Everything a strategy may look at. Raw texts for lookup, résumé sentence
/// embeddings for the semantic strategy.
#[derive(Debug, Clone, Copy)]
pub struct SkillEvidence<'a> {
    pub resume_text: &'a str,
    pub job_description_text: &'a str,
    pub resume_embeddings: &'a EmbeddingMatrix,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait and strategy selection
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap skill matching without touching the pipeline.
pub trait SkillMatcher: Send + Sync {
    /// Strategy label, surfaced on `/health`.
    fn name(&self) -> &'static str;

    fn match_skills(&self, evidence: &SkillEvidence<'_>) -> SkillMatch;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillMatchStrategy {
    #[default]
    Substring,
    CategoryWeighted,
    Semantic,
}

impl SkillMatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillMatchStrategy::Substring => "substring",
            SkillMatchStrategy::CategoryWeighted => "category_weighted",
            SkillMatchStrategy::Semantic => "semantic",
        }
    }
}

impl fmt::Display for SkillMatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown skill match strategy '{0}' (expected substring, category_weighted, or semantic)")]
pub struct UnknownStrategy(String);

impl FromStr for SkillMatchStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(SkillMatchStrategy::Substring),
            "category_weighted" | "weighted" => Ok(SkillMatchStrategy::CategoryWeighted),
            "semantic" => Ok(SkillMatchStrategy::Semantic),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Substring lookup
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases and replaces every character other than `a-z`, `0-9`, `+` and
/// space with a space. "C++" stays "c++"; "Python/Django" becomes "python django".
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Every vocabulary skill occurring as a substring of the normalised text.
///
/// Entries containing punctuation ("node.js", "ci/cd") never survive
/// normalisation of the text and so are never found.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }
    let normalized = normalize_text(text);
    vocabulary
        .skills()
        .iter()
        .filter(|skill| normalized.contains(skill.as_str()))
        .cloned()
        .collect()
}

/// Intersects résumé skills with JD skills.
pub fn match_skills(
    resume_text: &str,
    job_description_text: &str,
    vocabulary: &SkillVocabulary,
) -> SkillMatch {
    let required = extract_skills(job_description_text, vocabulary);
    let present = extract_skills(resume_text, vocabulary);
    partition(&required, &present)
}

/// Splits `required` into matched/missing against `present`.
fn partition(required: &BTreeSet<String>, present: &BTreeSet<String>) -> SkillMatch {
    if required.is_empty() {
        return SkillMatch::no_requirements();
    }
    // BTreeSet iteration is already ascending.
    let matched: Vec<String> = required.intersection(present).cloned().collect();
    let missing: Vec<String> = required.difference(present).cloned().collect();
    let overlap_ratio = matched.len() as f64 / required.len() as f64;
    SkillMatch {
        matched,
        missing,
        overlap_ratio,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Category weighting
// ────────────────────────────────────────────────────────────────────────────

/// Σ(weight × matched_in_category / required_in_category) / Σ(weight), over the
/// categories with at least one requirement. `1.0` when no category applies.
pub fn weighted_skill_score(
    matched: &BTreeSet<String>,
    required: &BTreeSet<String>,
    categories: &[SkillCategory],
) -> f64 {
    let mut score = 0.0;
    let mut total_weight = 0.0;

    for category in categories {
        let required_here = category.skills.intersection(required).count();
        if required_here == 0 {
            continue;
        }
        let matched_here = category.skills.intersection(matched).count();
        score += category.weight * matched_here as f64 / required_here as f64;
        total_weight += category.weight;
    }

    if total_weight > 0.0 {
        score / total_weight
    } else {
        1.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Embedding detection
// ────────────────────────────────────────────────────────────────────────────

/// Phrases whose embedding reaches `threshold` against at least one résumé sentence.
pub fn detect_semantic_skills(
    phrase_embeddings: &[(String, Vec<f32>)],
    resume_embeddings: &EmbeddingMatrix,
    threshold: f64,
) -> BTreeSet<String> {
    phrase_embeddings
        .iter()
        .filter(|(_, phrase)| {
            resume_embeddings
                .rows()
                .iter()
                .any(|sentence| cosine_similarity(phrase, sentence) >= threshold)
        })
        .map(|(skill, _)| skill.clone())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

/// Literal vocabulary lookup in both texts. Fast, deterministic, explainable.
pub struct SubstringSkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
}

impl SubstringSkillMatcher {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl SkillMatcher for SubstringSkillMatcher {
    fn name(&self) -> &'static str {
        SkillMatchStrategy::Substring.as_str()
    }

    fn match_skills(&self, evidence: &SkillEvidence<'_>) -> SkillMatch {
        match_skills(
            evidence.resume_text,
            evidence.job_description_text,
            &self.vocabulary,
        )
    }
}

/// Substring sets, but the overlap ratio weighs each skill category separately so a
/// gap in a heavy category (core ML) costs more than one in a light one (devops).
pub struct CategoryWeightedSkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
}

impl CategoryWeightedSkillMatcher {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl SkillMatcher for CategoryWeightedSkillMatcher {
    fn name(&self) -> &'static str {
        SkillMatchStrategy::CategoryWeighted.as_str()
    }

    fn match_skills(&self, evidence: &SkillEvidence<'_>) -> SkillMatch {
        let required = extract_skills(evidence.job_description_text, &self.vocabulary);
        let present = extract_skills(evidence.resume_text, &self.vocabulary);
        let mut result = partition(&required, &present);
        if !required.is_empty() {
            let matched: BTreeSet<String> = result.matched.iter().cloned().collect();
            result.overlap_ratio =
                weighted_skill_score(&matched, &required, self.vocabulary.categories());
        }
        result
    }
}

/// JD requirements by literal lookup; a requirement is met when it appears
/// literally in the résumé or its phrase embedding reaches the threshold against
/// some résumé sentence.
///
/// Phrase embeddings are computed once at construction and live as long as the
/// matcher.
pub struct SemanticSkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
    phrase_embeddings: Vec<(String, Vec<f32>)>,
    threshold: f64,
}

impl SemanticSkillMatcher {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        embedder: &dyn Embedder,
        threshold: f64,
    ) -> Result<Self, ScoringError> {
        let phrases: Vec<String> = vocabulary.phrases().iter().cloned().collect();
        let encoded = embedder.encode(&phrases)?;
        if encoded.len() != phrases.len() {
            return Err(ScoringError::InvalidInput(format!(
                "embedder returned {} rows for {} skill phrases",
                encoded.len(),
                phrases.len()
            )));
        }
        let phrase_embeddings: Vec<(String, Vec<f32>)> = phrases
            .into_iter()
            .zip(encoded.rows().iter().cloned())
            .collect();

        debug!(
            "Precomputed {} skill phrase embeddings (threshold {threshold})",
            phrase_embeddings.len()
        );

        Ok(Self {
            vocabulary,
            phrase_embeddings,
            threshold,
        })
    }
}

impl SkillMatcher for SemanticSkillMatcher {
    fn name(&self) -> &'static str {
        SkillMatchStrategy::Semantic.as_str()
    }

    fn match_skills(&self, evidence: &SkillEvidence<'_>) -> SkillMatch {
        let required = extract_skills(evidence.job_description_text, &self.vocabulary);
        let mut present = extract_skills(evidence.resume_text, &self.vocabulary);
        present.extend(detect_semantic_skills(
            &self.phrase_embeddings,
            evidence.resume_embeddings,
            self.threshold,
        ));
        partition(&required, &present)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
