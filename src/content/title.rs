//! Fallback titles derived from page filenames

use super::MARKDOWN_SUFFIX;

/// "tools-access.md" -> "Tools Access"
pub fn title_from_filename(name: &str) -> String {
    let stem = name.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(name);
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, leave the rest as written
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
