//! Skill vocabulary: the fixed, curated set of canonical skills the matchers look for.
//!
//! Lowercase only. Multi-word phrases are allowed ("machine learning").
//! Matching is literal substring search over normalised text, so very short
//! entries ("c", "r", "go") fire on most English prose. They are kept because the
//! reference vocabulary carries them; deployments wanting fewer false positives
//! inject a trimmed vocabulary.

use std::collections::BTreeSet;

#[rustfmt::skip]
const RECOGNIZED_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "c++", "c", "javascript", "typescript",
    "go", "golang", "rust", "scala", "kotlin", "bash",
    "sql", "r", "matlab",
    // ML / AI core
    "machine learning", "deep learning", "artificial intelligence",
    "supervised learning", "unsupervised learning",
    "reinforcement learning",
    "nlp", "natural language processing",
    "computer vision", "cv",
    "speech recognition", "text classification",
    "information retrieval", "recommendation systems",
    // ML frameworks and libraries
    "pytorch", "tensorflow", "keras", "scikit-learn",
    "xgboost", "lightgbm", "catboost",
    "huggingface", "transformers",
    "opencv", "spacy", "nltk",
    "pandas", "numpy", "scipy",
    // Data and analytics
    "data analysis", "data science", "data engineering",
    "feature engineering", "data preprocessing",
    "data visualization",
    "power bi", "tableau",
    // Backend and APIs
    "fastapi", "django", "flask",
    "node.js", "express",
    "rest api", "graphql",
    "microservices",
    // Databases and storage
    "mysql", "postgresql", "sqlite",
    "mongodb", "redis", "elasticsearch",
    "cassandra", "dynamodb",
    // DevOps / MLOps / cloud
    "docker", "kubernetes", "helm",
    "ci/cd", "github actions",
    "mlops", "model deployment",
    "model monitoring",
    "aws", "gcp", "azure",
    "ec2", "s3", "lambda",
    "cloud functions",
    // Systems and CS fundamentals
    "data structures", "algorithms",
    "operating systems", "computer networks",
    "dbms", "system design",
    "distributed systems",
    "parallel computing",
    // Software engineering
    "object oriented programming", "oop",
    "design patterns", "clean architecture",
    "unit testing", "integration testing",
    "debugging", "performance optimization",
    // Tools and platforms
    "git", "github", "gitlab",
    "linux", "unix",
    "jira", "confluence",
    "docker compose",
    // Research and advanced topics
    "transformer models", "llms",
    "attention mechanism",
    "bert", "gpt",
    "time series forecasting",
    "anomaly detection",
];

/// Phrases embedded once at startup for the semantic skill strategy.
const SKILL_PHRASES: &[&str] = &[
    "machine learning",
    "ml",
    "deep learning",
    "neural networks",
    "nlp",
    "natural language processing",
    "computer vision",
    "cv",
    "python",
    "fastapi",
    "rest api",
    "docker",
    "kubernetes",
    "aws",
    "gcp",
    "azure",
];

const SKILL_CATEGORIES: &[(&str, f64, &[&str])] = &[
    (
        "core_ml",
        0.4,
        &[
            "machine learning",
            "ml",
            "deep learning",
            "neural networks",
            "nlp",
            "computer vision",
        ],
    ),
    (
        "backend",
        0.25,
        &["python", "fastapi", "django", "flask", "rest api"],
    ),
    ("data", 0.2, &["sql", "mongodb", "pandas", "numpy"]),
    (
        "devops",
        0.15,
        &["docker", "kubernetes", "aws", "gcp", "azure"],
    ),
];

/// A named group of skills with a fixed weight for the category-weighted strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    pub weight: f64,
    pub skills: BTreeSet<String>,
}

impl SkillCategory {
    pub fn new<I, S>(name: &str, weight: f64, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            weight,
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable skill configuration injected into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    skills: BTreeSet<String>,
    phrases: BTreeSet<String>,
    categories: Vec<SkillCategory>,
}

impl SkillVocabulary {
    /// A vocabulary with the given skills and no phrases or categories.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(|s| s.into().to_lowercase()).collect(),
            phrases: BTreeSet::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases.into_iter().map(|s| s.into().to_lowercase()).collect();
        self
    }

    pub fn with_categories(mut self, categories: Vec<SkillCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn phrases(&self) -> &BTreeSet<String> {
        &self.phrases
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(RECOGNIZED_SKILLS.iter().copied())
            .with_phrases(SKILL_PHRASES.iter().copied())
            .with_categories(
                SKILL_CATEGORIES
                    .iter()
                    .map(|(name, weight, skills)| {
                        SkillCategory::new(name, *weight, skills.iter().copied())
                    })
                    .collect(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_is_lowercase() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.skills().iter().all(|s| *s == s.to_lowercase()));
        assert!(vocab.skills().contains("machine learning"));
        assert!(vocab.skills().contains("c++"));
    }

    #[test]
    fn test_default_categories_and_weights() {
        let vocab = SkillVocabulary::default();
        let names: Vec<&str> = vocab.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["core_ml", "backend", "data", "devops"]);
        let total: f64 = vocab.categories().iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_vocabulary_lowercases_entries() {
        let vocab = SkillVocabulary::new(["Kubernetes", "Rust"]).with_phrases(["Rust"]);
        assert!(vocab.skills().contains("kubernetes"));
        assert!(vocab.phrases().contains("rust"));
        assert!(vocab.categories().is_empty());
    }
}
