use serde::{Deserialize, Serialize};

/// Process-wide weights for the three signals. The reference set sums to 1.0 so
/// the fit score reads as a percentage; the formula itself does not require it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.6,
            skills: 0.3,
            experience: 0.1,
        }
    }
}

/// `100 × (w_sem·semantic + w_skill·skills + w_exp·experience)`, rounded to two
/// decimals and clamped to [0, 100].
pub fn final_score(semantic: f64, skills: f64, experience: f64, weights: &ScoringWeights) -> f64 {
    let raw = weights.semantic * semantic + weights.skills * skills + weights.experience * experience;
    round_to(raw * 100.0, 2).clamp(0.0, 100.0)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
