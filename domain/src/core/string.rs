//! String utilities for the domain layer.

/// Upper-case the first character, leaving the rest untouched (UTF-8 safe)
///
/// Seat colors arrive lower-case from the host ("red", "purple") and are
/// shown capitalized in outcome names and broadcasts.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
