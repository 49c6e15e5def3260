//! Sentence splitting.
//!
//! `.` is the only delimiter. Abbreviations ("Dr."), decimals ("3.5 years") and
//! ellipses all split too; this is a known limitation of the splitter.

/// Splits `text` into trimmed, non-empty sentence fragments.
///
/// Never returns an empty batch: blank input yields `[""]`, and input made only of
/// delimiters yields the stripped text as a single element.
pub fn split_sentences(text: &str) -> Vec<String> {
    let stripped = text.trim();
    if stripped.is_empty() {
        return vec![String::new()];
    }

    let sentences: Vec<String> = text
        .replace('\n', " ")
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if sentences.is_empty() {
        vec![stripped.to_string()]
    } else {
        sentences
    }
}
