//! Ordered pattern tables shared by the interpreters.
//!
//! A table is a literal slice of `(Regex, value)` pairs. Lookup walks it once
//! and the first regex matching anywhere in the input decides the value, so
//! the table order is the precedence.
//!
//! Keywords are written inside `(?i-u:...)` groups. Case folding is then
//! ASCII-only, so `ſ` never stands in for `s` and `K` (Kelvin) never for `k`.

use regex::Regex;

/// Compile a built-in pattern.
pub fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Value paired with the first pattern that matches `text`.
pub fn first_match<T: Copy>(table: &[(Regex, T)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, value)| *value)
}

/// Capture group 1 of the leftmost match, trimmed.
///
/// Returns `None` when nothing matches or the capture is blank.
pub fn capture_trimmed<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}
