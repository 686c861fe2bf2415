//! Shared rendering utilities and helpers.
//!
//! # Features
//!
//! - **Match Ranges**: Locates case-insensitive search matches in display text
//! - **Match Highlighting**: Marks those ranges in plain text
//! - **Layout**: Centering, truncation and title-casing of labels
//! - **UTF-8 Safe**: Operates on character indices, not byte indices
//!
//! # Example
//!
//! ```rust
//! use jobtrail::ui::helpers::{match_ranges, render_highlighted_text};
//!
//! let ranges = match_ranges("ACME Corp", "corp");
//! assert_eq!(ranges, vec![(5, 9)]);
//! assert_eq!(render_highlighted_text("ACME Corp", &ranges), "ACME [Corp]");
//! ```

/// Finds every non-overlapping, case-insensitive occurrence of `needle`.
///
/// Both sides are lowercased per character the way the search filter does
/// it, so a record the filter keeps always gets its match highlighted even
/// when lowercasing changes the length (`İ` lowercases to two characters).
///
/// # Returns
///
/// `(start, end)` character index ranges into `text` (exclusive end), left to
/// right. An empty needle matches nothing.
#[must_use]
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    // Folded characters, each paired with the index of the char it came from.
    let hay: Vec<(char, usize)> = text
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |lower| (lower, index)))
        .collect();
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    if needle.is_empty() || needle.len() > hay.len() {
        return vec![];
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let window = &hay[i..i + needle.len()];
        let start = window[0].1;
        let end = window[needle.len() - 1].1 + 1;
        let clear = ranges.last().map_or(true, |&(_, last_end)| start >= last_end);

        if clear && window.iter().map(|&(c, _)| c).eq(needle.iter().copied()) {
            ranges.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Renders text with highlighted character ranges wrapped in brackets.
///
/// Ranges past the end of `text` are clipped.
#[must_use]
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push('[');
        out.extend(&chars[start..end]);
        out.push(']');
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Cuts `text` to at most `max_chars` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Centers `text` within `cols` columns.
#[must_use]
pub fn center(text: &str, cols: usize) -> String {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Upper-cases the first letter of every space-separated word.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
