//! Text utilities for the domain layer.

/// Marker appended when input is clipped before being sent upstream.
pub const TRUNCATION_MARKER: &str = "...";

/// Clip a string to at most `max` characters, appending the truncation
/// marker when anything was cut.
///
/// Counts `char`s, not bytes, so the cut always lands on a UTF-8 boundary.
/// The marker is appended *after* the `max`-char prefix: callers get exactly
/// `max` characters of payload plus the marker.
pub fn clip_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}{}", &s[..byte_idx], TRUNCATION_MARKER),
        None => s.to_string(),
    }
}

/// Clip a string to at most `max` characters with no marker.
///
/// Used for summarize input, which is cut silently.
pub fn clip_chars_silent(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
