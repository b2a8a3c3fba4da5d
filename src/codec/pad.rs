//! Fixed-width padding
//!
//! Width is measured in UTF-16 code units, so a character outside the
//! Basic Multilingual Plane counts as two. Values already at or past the
//! target width come back unchanged.

const DEFAULT_FILL: char = '0';

/// Prepend `width - len` copies of `fill` (default `'0'`)
pub fn pad_left(value: &str, width: usize, fill: Option<char>) -> String {
    let missing = missing_units(value, width);
    let mut padded: String = std::iter::repeat(fill.unwrap_or(DEFAULT_FILL))
        .take(missing)
        .collect();
    padded.push_str(value);
    padded
}

/// Append `width - len` copies of `fill` (default `'0'`)
pub fn pad_right(value: &str, width: usize, fill: Option<char>) -> String {
    let missing = missing_units(value, width);
    let mut padded = value.to_string();
    padded.extend(std::iter::repeat(fill.unwrap_or(DEFAULT_FILL)).take(missing));
    padded
}

fn missing_units(value: &str, width: usize) -> usize {
    width.saturating_sub(value.encode_utf16().count())
}
