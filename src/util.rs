//! Shared text helpers for fixed-width table cells

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, marking the cut with `…`.
///
/// Width is measured in display columns, so CJK and emoji count double and
/// the result never splits a character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_to_width("hello world", 6), "hello…");
/// assert_eq!(truncate_to_width("日本語", 5), "日本…");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Truncate then right-pad with spaces to exactly `width` columns
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut cell = truncate_to_width(s, width);
    let pad = width.saturating_sub(cell.width());
    cell.extend(std::iter::repeat(' ').take(pad));
    cell
}

/// Collapse newlines and tabs so a value stays on one table line
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each character is 2 columns wide
        assert_eq!(truncate_to_width("日本語", 5), "日本…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_fit_pads() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abc…");
        assert_eq!(fit_to_width("日", 3).width(), 3);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("crash\non  save\t!"), "crash on save !");
    }
}
