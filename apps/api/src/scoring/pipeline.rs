//! Fit pipeline: owns the embedder and the active skill strategy, and sequences
//! one stateless evaluation per call.
//!
//! split → embed → coverage (JD → résumé) ∥ skills (raw text) ∥ experience (raw
//! text) → weighted score → explanation.
//!
//! Concurrent `evaluate` calls are safe: the pipeline is read-only after
//! construction. `evaluate` may block inside the embedder; the HTTP shell runs it
//! on a blocking thread.

use std::sync::Arc;

use tracing::{debug, info};

use crate::embedding::Embedder;
use crate::models::evaluation::EvaluationResult;
use crate::scoring::error::ScoringError;
use crate::scoring::experience::experience_score;
use crate::scoring::explanation::generate_explanation;
use crate::scoring::final_score::{final_score, round_to, ScoringWeights};
use crate::scoring::sentences::split_sentences;
use crate::scoring::similarity::average_max_cosine_similarity;
use crate::scoring::skills::{
    CategoryWeightedSkillMatcher, SemanticSkillMatcher, SkillEvidence, SkillMatchStrategy,
    SkillMatcher, SubstringSkillMatcher,
};
use crate::scoring::vocabulary::SkillVocabulary;

/// Component scores are reported to three decimals.
const REPORTED_DECIMALS: i32 = 3;

/// Immutable scoring configuration injected at construction.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub vocabulary: Arc<SkillVocabulary>,
    pub strategy: SkillMatchStrategy,
    /// Only read by the semantic strategy.
    pub semantic_skill_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            vocabulary: Arc::new(SkillVocabulary::default()),
            strategy: SkillMatchStrategy::default(),
            semantic_skill_threshold: 0.65,
        }
    }
}

pub struct FitPipeline {
    embedder: Arc<dyn Embedder>,
    skill_matcher: Box<dyn SkillMatcher>,
    weights: ScoringWeights,
}

impl FitPipeline {
    /// Builds the strategy named in `config`. The semantic strategy encodes its
    /// skill phrases here, so this may block on the embedder.
    pub fn new(embedder: Arc<dyn Embedder>, config: ScoringConfig) -> Result<Self, ScoringError> {
        let skill_matcher: Box<dyn SkillMatcher> = match config.strategy {
            SkillMatchStrategy::Substring => {
                Box::new(SubstringSkillMatcher::new(config.vocabulary))
            }
            SkillMatchStrategy::CategoryWeighted => {
                Box::new(CategoryWeightedSkillMatcher::new(config.vocabulary))
            }
            SkillMatchStrategy::Semantic => Box::new(SemanticSkillMatcher::new(
                config.vocabulary,
                embedder.as_ref(),
                config.semantic_skill_threshold,
            )?),
        };

        Ok(Self::with_skill_matcher(
            embedder,
            skill_matcher,
            config.weights,
        ))
    }

    pub fn with_skill_matcher(
        embedder: Arc<dyn Embedder>,
        skill_matcher: Box<dyn SkillMatcher>,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            embedder,
            skill_matcher,
            weights,
        }
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    pub fn skill_strategy(&self) -> &'static str {
        self.skill_matcher.name()
    }

    /// Scores `resume_text` against `job_description_text`.
    ///
    /// Fails fast: an embedder failure or an `InvalidInput` from coverage scoring
    /// is returned unchanged and no partial result is produced.
    pub fn evaluate(
        &self,
        resume_text: &str,
        job_description_text: &str,
    ) -> Result<EvaluationResult, ScoringError> {
        let resume_sentences = split_sentences(resume_text);
        let jd_sentences = split_sentences(job_description_text);

        let resume_embeddings = self.embedder.encode(&resume_sentences)?;
        let jd_embeddings = self.embedder.encode(&jd_sentences)?;

        // JD sentences are the requirements, résumé sentences the evidence.
        let semantic = average_max_cosine_similarity(&jd_embeddings, &resume_embeddings)?;

        let skills = self.skill_matcher.match_skills(&SkillEvidence {
            resume_text,
            job_description_text,
            resume_embeddings: &resume_embeddings,
        });

        let experience = experience_score(resume_text, job_description_text);

        let fit_score = final_score(semantic, skills.overlap_ratio, experience, &self.weights);

        debug!(
            "Evaluation components: resume_sentences={}, jd_sentences={}, semantic={:.4}, \
             skill_overlap={:.4}, experience={:.4}, strategy={}",
            resume_sentences.len(),
            jd_sentences.len(),
            semantic,
            skills.overlap_ratio,
            experience,
            self.skill_matcher.name()
        );

        let explanation =
            generate_explanation(semantic, &skills.matched, &skills.missing, experience);

        info!(
            "Evaluation complete: fit_score={fit_score}, matched={}, missing={}",
            skills.matched.len(),
            skills.missing.len()
        );

        Ok(EvaluationResult {
            fit_score,
            semantic_similarity_score: round_to(semantic, REPORTED_DECIMALS),
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            experience_match_score: round_to(experience, REPORTED_DECIMALS),
            explanation,
        })
    }
}
