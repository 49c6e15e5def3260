use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::scoring::final_score::ScoringWeights;
use crate::scoring::skills::SkillMatchStrategy;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbedderBackend {
    #[default]
    Hash,
    Remote,
}

impl FromStr for EmbedderBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hash" => Ok(EmbedderBackend::Hash),
            "remote" => Ok(EmbedderBackend::Remote),
            other => bail!("unknown embedder backend '{other}' (expected hash or remote)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default except `EMBEDDING_API_URL`, which the remote
/// backend requires.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedder_backend: EmbedderBackend,
    pub embedding_dimension: usize,
    pub embedding_api_url: Option<String>,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub skill_strategy: SkillMatchStrategy,
    pub semantic_skill_threshold: f64,
    pub weights: ScoringWeights,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            embedder_backend: EmbedderBackend::Hash,
            embedding_dimension: 384,
            embedding_api_url: None,
            embedding_api_key: None,
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            skill_strategy: SkillMatchStrategy::Substring,
            semantic_skill_threshold: 0.65,
            weights: ScoringWeights::default(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            embedder_backend: parse_or(&lookup, "EMBEDDER_BACKEND", defaults.embedder_backend)?,
            embedding_dimension: parse_or(
                &lookup,
                "EMBEDDING_DIMENSION",
                defaults.embedding_dimension,
            )?,
            embedding_api_url: lookup("EMBEDDING_API_URL").filter(|v| !v.trim().is_empty()),
            embedding_api_key: lookup("EMBEDDING_API_KEY").filter(|v| !v.trim().is_empty()),
            embedding_model: lookup("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            skill_strategy: parse_or(&lookup, "SKILL_MATCH_STRATEGY", defaults.skill_strategy)?,
            semantic_skill_threshold: parse_or(
                &lookup,
                "SEMANTIC_SKILL_THRESHOLD",
                defaults.semantic_skill_threshold,
            )?,
            weights: ScoringWeights {
                semantic: parse_or(&lookup, "WEIGHT_SEMANTIC", defaults.weights.semantic)?,
                skills: parse_or(&lookup, "WEIGHT_SKILLS", defaults.weights.skills)?,
                experience: parse_or(&lookup, "WEIGHT_EXPERIENCE", defaults.weights.experience)?,
            },
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            weights: self.weights,
            strategy: self.skill_strategy,
            semantic_skill_threshold: self.semantic_skill_threshold,
            ..ScoringConfig::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.embedding_dimension == 0 {
            bail!("EMBEDDING_DIMENSION must be greater than zero");
        }
        if self.embedder_backend == EmbedderBackend::Remote && self.embedding_api_url.is_none() {
            bail!("EMBEDDING_API_URL is required when EMBEDDER_BACKEND=remote");
        }
        if !self.semantic_skill_threshold.is_finite() {
            bail!("SEMANTIC_SKILL_THRESHOLD must be a finite number");
        }
        let w = &self.weights;
        if [w.semantic, w.skills, w.experience]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            bail!("scoring weights must be finite and non-negative");
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.embedder_backend, EmbedderBackend::Hash);
        assert_eq!(config.embedding_dimension, 384);
        assert_eq!(config.skill_strategy, SkillMatchStrategy::Substring);
        assert_eq!(config.weights, ScoringWeights::default());
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("SKILL_MATCH_STRATEGY", "semantic"),
            ("SEMANTIC_SKILL_THRESHOLD", "0.7"),
            ("WEIGHT_SEMANTIC", "0.5"),
            ("WEIGHT_SKILLS", "0.4"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.skill_strategy, SkillMatchStrategy::Semantic);
        assert_eq!(config.semantic_skill_threshold, 0.7);
        assert_eq!(config.weights.semantic, 0.5);
        assert_eq!(config.weights.skills, 0.4);
        assert_eq!(config.weights.experience, 0.1);

        let scoring = config.scoring_config();
        assert_eq!(scoring.strategy, SkillMatchStrategy::Semantic);
        assert_eq!(scoring.weights, config.weights);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        assert!(config_from(&[("SKILL_MATCH_STRATEGY", "fuzzy")]).is_err());
    }

    #[test]
    fn test_remote_backend_requires_url() {
        assert!(config_from(&[("EMBEDDER_BACKEND", "remote")]).is_err());
        let config = config_from(&[
            ("EMBEDDER_BACKEND", "remote"),
            ("EMBEDDING_API_URL", "http://localhost:8081/v1/embeddings"),
        ])
        .unwrap();
        assert_eq!(config.embedder_backend, EmbedderBackend::Remote);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        assert!(config_from(&[("WEIGHT_EXPERIENCE", "-0.1")]).is_err());
    }

    #[test]
    fn test_non_finite_threshold_is_rejected() {
        assert!(config_from(&[("SEMANTIC_SKILL_THRESHOLD", "NaN")]).is_err());
        assert!(config_from(&[("SEMANTIC_SKILL_THRESHOLD", "inf")]).is_err());
        let config = config_from(&[("SEMANTIC_SKILL_THRESHOLD", "0.8")]).unwrap();
        assert_eq!(config.semantic_skill_threshold, 0.8);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(config_from(&[("EMBEDDING_DIMENSION", "0")]).is_err());
    }
}
