//! Signal column heuristic
//!
//! Substring match on column names. A column merely containing a keyword is
//! picked regardless of what it holds; swap this out for an explicit column
//! role when one is available.

/// Lowercase substrings that mark a latency / timing column
pub const SIGNAL_KEYWORDS: &[&str] = &["latency", "elapsed", "response", "time"];

/// First column (original order) whose name contains a signal keyword
pub fn detect_signal_column<S: AsRef<str>>(column_names: &[S]) -> Option<&str> {
    column_names.iter().map(|s| s.as_ref()).find(|name| {
        let lower = name.to_lowercase();
        SIGNAL_KEYWORDS.iter().any(|k| lower.contains(k))
    })
}
