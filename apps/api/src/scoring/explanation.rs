/// Renders the component scores as a fixed-template, human-readable summary.
pub fn generate_explanation(
    semantic_similarity: f64,
    matched_skills: &[String],
    missing_skills: &[String],
    experience_score: f64,
) -> String {
    let num_matched = matched_skills.len();
    let plural = if num_matched == 1 { "" } else { "s" };
    let missing = if missing_skills.is_empty() {
        "None".to_string()
    } else {
        missing_skills.join(", ")
    };

    format!(
        "Semantic match score is {semantic_similarity:.2}. \
         Matched {num_matched} required skill{plural}. \
         Experience alignment score is {experience_score:.2}. \
         Missing skills include: {missing}."
    )
}
