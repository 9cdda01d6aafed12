//! Normalization and validation for textual passport fields.

use super::patterns::WHITESPACE_RUN;

/// MRZ filler character.
const MRZ_FILLER: char = '<';

/// Trim outer whitespace and collapse internal whitespace runs to one space.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// Normalize an alphanumeric code (passport number, file number).
pub fn normalize_code(raw: &str) -> String {
    collapse_whitespace(raw)
        .chars()
        .filter(|c| *c != MRZ_FILLER)
        .collect::<String>()
        .to_uppercase()
}

/// Accept `[A-Z0-9]+` of at least `min_len` characters.
pub fn validate_code(candidate: &str, min_len: usize) -> bool {
    candidate.len() >= min_len.max(1)
        && candidate
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Normalize a personal name or other alphabetic run.
///
/// MRZ fillers separate name parts, so they become spaces before collapsing.
pub fn normalize_name(raw: &str) -> String {
    let spaced = raw.replace(MRZ_FILLER, " ");
    collapse_whitespace(&spaced).to_uppercase()
}

/// Accept a non-empty run of letters, spaces, hyphens and apostrophes.
pub fn validate_name(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.chars().any(char::is_alphabetic)
        && candidate
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
}

/// Normalize a free-text value such as a place name.
pub fn normalize_text(raw: &str) -> String {
    collapse_whitespace(raw).to_uppercase()
}

/// Free text must carry at least one letter or digit.
pub fn validate_text(candidate: &str) -> bool {
    candidate.chars().any(char::is_alphanumeric)
}

/// Normalize a sex marker, shortening spelled-out values.
pub fn normalize_sex(raw: &str) -> String {
    let value = collapse_whitespace(raw).to_uppercase();
    match value.as_str() {
        "MALE" => "M".to_string(),
        "FEMALE" => "F".to_string(),
        _ => value,
    }
}

/// Accept exactly `M` or `F`.
pub fn validate_sex(candidate: &str) -> bool {
    matches!(candidate, "M" | "F")
}
