// crates/apiforge-sdk-gen/src/naming.rs
// ============================================================================
// Module: Naming Utilities
// Description: Case conversion and identifier escaping for generated code.
// Purpose: Keep every emitter on one set of identifier rules.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Words are split on non-alphanumeric characters and on case boundaries
//! (`listPets`, `HTTPServer`), then re-joined as `camelCase`, `PascalCase`,
//! or `snake_case`. [`identifier`] finishes a converted name for a target
//! language: it guards against empty names, leading digits, reserved words,
//! and duplicates within one scope.

use std::collections::BTreeSet;

// ============================================================================
// SECTION: Case Conversion
// ============================================================================

/// Splits an arbitrary name into lowercase words.
fn words(value: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = value.chars().collect();
    for (index, ch) in chars.iter().copied().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercases the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut out = first.to_ascii_uppercase().to_string();
        out.push_str(chars.as_str());
        out
    })
}

/// Converts a name into `camelCase`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    let mut out = String::new();
    for (index, word) in words(value).iter().enumerate() {
        if index == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Converts a name into `PascalCase`.
#[must_use]
pub fn pascal_case(value: &str) -> String {
    words(value).iter().map(|word| capitalize(word)).collect()
}

/// Converts a name into `snake_case`.
#[must_use]
pub fn snake_case(value: &str) -> String {
    words(value).join("_")
}

/// Converts a name into `kebab-case`.
#[must_use]
pub fn kebab_case(value: &str) -> String {
    words(value).join("-")
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Finishes a converted name as a unique identifier in one scope.
///
/// Empty names become `fallback`, leading digits gain a `_` prefix, reserved
/// words gain a `_` suffix, and duplicates gain a numeric suffix. The result
/// is recorded in `taken`.
pub fn identifier(
    converted: String,
    fallback: &str,
    reserved: &[&str],
    taken: &mut BTreeSet<String>,
) -> String {
    let mut name = if converted.is_empty() { fallback.to_string() } else { converted };
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if reserved.contains(&name.as_str()) {
        name.push('_');
    }
    let mut candidate = name.clone();
    let mut counter = 2;
    while taken.contains(&candidate) {
        candidate = format!("{name}{counter}");
        counter += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Derives the generated client class name from a contract title.
///
/// Title words are capitalized and joined; `Api` is appended unless the
/// result already ends in `Api` or `API`.
#[must_use]
pub fn api_class_name(title: &str) -> String {
    let joined: String = title
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    if joined.is_empty() {
        return "Api".to_string();
    }
    let mut name = if joined.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("Api{joined}")
    } else {
        joined
    };
    if !(name.ends_with("Api") || name.ends_with("API")) {
        name.push_str("Api");
    }
    name
}

/// Collapses whitespace and strips characters that would end a string
/// literal or comment in generated code.
#[must_use]
pub fn inline_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['"', '\\'], "")
        .replace("*/", "* /")
}
