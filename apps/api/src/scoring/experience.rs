//! Years-of-experience extraction and alignment.

use once_cell::sync::Lazy;
use regex::Regex;

/// A number (integer or decimal), optional `+`, then "year" or "years".
/// Matches "3 years", "5+ years", "7.5 years", "10+years".
static RE_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*\+?\s*years?").expect("years pattern is valid")
});

/// Largest "N years" figure in `text`, or `0.0` when none is mentioned.
///
/// The maximum is taken on the assumption that a text listing several figures
/// ("3 years Python, 5 years total") states its overall total as the highest one.
/// `0.0` means "not mentioned", not "zero years stated".
pub fn extract_years(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    RE_YEARS
        .captures_iter(&lowered)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .fold(0.0, f64::max)
}

/// `min(candidate / required, 1.0)`; `1.0` when the JD states no requirement.
/// Exceeding the requirement earns no bonus.
///
/// Figures too long for `f64` parse to infinity; an undefined ratio
/// (`inf / inf`) scores `0.0`.
pub fn experience_score(resume_text: &str, job_description_text: &str) -> f64 {
    let required = extract_years(job_description_text);
    if required <= 0.0 {
        return 1.0;
    }
    let candidate = extract_years(resume_text);
    let ratio = candidate / required;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
