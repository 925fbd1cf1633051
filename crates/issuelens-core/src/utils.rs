// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for issuelens.
//!
//! Provides the truncation rule applied to issue text before it is sent to the model.

/// Maximum number of characters kept from any single issue text field.
pub const MAX_TEXT_CHARS: usize = 6000;

/// Marker appended to text that was cut at [`MAX_TEXT_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n[... truncated for analysis ...]";

/// Truncates text to a maximum length, appending a suffix when it was cut.
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// Unlike a display truncation, the suffix is *not* counted against `max_len`:
/// a truncated result is always exactly `max_len` characters plus the suffix.
///
/// # Examples
///
/// ```
/// use issuelens_core::utils::truncate_with_marker;
///
/// assert_eq!(truncate_with_marker("short", 10, "[cut]"), "short");
/// assert_eq!(truncate_with_marker("abcdefghij", 4, "[cut]"), "abcd[cut]");
/// ```
#[must_use]
pub fn truncate_with_marker(text: &str, max_len: usize, marker: &str) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}{marker}", &text[..byte_idx]),
    }
}

/// Applies the analysis truncation rule ([`MAX_TEXT_CHARS`] + [`TRUNCATION_MARKER`]).
///
/// # Examples
///
/// ```
/// use issuelens_core::utils::{MAX_TEXT_CHARS, TRUNCATION_MARKER, truncate_for_analysis};
///
/// let long = "x".repeat(MAX_TEXT_CHARS + 1);
/// let result = truncate_for_analysis(&long);
/// assert!(result.ends_with(TRUNCATION_MARKER));
/// assert_eq!(
///     result.chars().count(),
///     MAX_TEXT_CHARS + TRUNCATION_MARKER.chars().count()
/// );
/// ```
#[must_use]
pub fn truncate_for_analysis(text: &str) -> String {
    truncate_with_marker(text, MAX_TEXT_CHARS, TRUNCATION_MARKER)
}

/// Collapses every line break into a single space.
///
/// Handles `\r\n`, `\n` and lone `\r` so one comment always renders on one line.
#[must_use]
pub fn collapse_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
