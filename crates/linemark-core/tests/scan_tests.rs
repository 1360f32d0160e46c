//! Integration tests for the low-level scanning helpers

use linemark_core::common::{
    find_next_non_whitespace, find_next_single_newline, find_next_whitespace,
    find_previous_single_newline, index_of, is_url_valid,
};

// ============================================================================
// Line Break Scanning
// ============================================================================

#[test]
fn test_find_next_single_newline_lf() {
    let text = "one\ntwo\nthree";
    assert_eq!(find_next_single_newline(text, 0, text.len()), Some((3, 4)));
    assert_eq!(find_next_single_newline(text, 4, text.len()), Some((7, 8)));
    assert_eq!(find_next_single_newline(text, 8, text.len()), None);
}

#[test]
fn test_find_next_single_newline_crlf() {
    let text = "one\r\ntwo";
    // break_pos points at the \r, next_line_start past the \n.
    assert_eq!(find_next_single_newline(text, 0, text.len()), Some((3, 5)));
}

#[test]
fn test_find_next_single_newline_lone_cr_is_not_a_break() {
    let text = "one\rtwo";
    assert_eq!(find_next_single_newline(text, 0, text.len()), None);
}

#[test]
fn test_find_next_single_newline_empty_range() {
    assert_eq!(find_next_single_newline("a\nb", 2, 2), None);
}

#[test]
fn test_find_previous_single_newline() {
    let text = "one\ntwo\nthree";
    assert_eq!(
        find_previous_single_newline(text, 0, text.len()),
        Some((7, 8))
    );
    assert_eq!(find_previous_single_newline(text, 0, 7), Some((3, 4)));
    assert_eq!(find_previous_single_newline(text, 0, 3), None);
}

#[test]
fn test_find_previous_single_newline_crlf() {
    let text = "one\r\ntwo";
    assert_eq!(
        find_previous_single_newline(text, 0, text.len()),
        Some((3, 5))
    );
}

// ============================================================================
// Substring Search
// ============================================================================

#[test]
fn test_index_of_forward_and_reverse() {
    let text = "abcabc";
    assert_eq!(index_of(text, "bc", 0, text.len(), false), Some(1));
    assert_eq!(index_of(text, "bc", 0, text.len(), true), Some(4));
    assert_eq!(index_of(text, "bc", 2, text.len(), false), Some(4));
    assert_eq!(index_of(text, "zz", 0, text.len(), false), None);
}

#[test]
fn test_index_of_respects_range() {
    let text = "abcabc";
    assert_eq!(index_of(text, "abc", 1, 5, false), None);
    assert_eq!(index_of(text, "", 0, text.len(), false), None);
}

// ============================================================================
// Whitespace Scanning
// ============================================================================

#[test]
fn test_find_next_whitespace() {
    let text = "word\tmore";
    assert_eq!(find_next_whitespace(text, 0, text.len()), Some(4));
    assert_eq!(find_next_whitespace(text, 5, text.len()), None);
}

#[test]
fn test_find_next_non_whitespace() {
    let text = "  \t x";
    assert_eq!(find_next_non_whitespace(text, 0, text.len()), Some(4));
    assert_eq!(find_next_non_whitespace("   ", 0, 3), None);
}

// ============================================================================
// URL Validation
// ============================================================================

const SCHEMES: &[&str] = &["http", "https", "mailto"];

#[test]
fn test_known_scheme_accepted() {
    assert!(is_url_valid("http://example.com", SCHEMES));
    assert!(is_url_valid("HTTPS://EXAMPLE.COM", SCHEMES));
    assert!(is_url_valid("mailto:someone@example.com", SCHEMES));
}

#[test]
fn test_unknown_scheme_rejected() {
    assert!(!is_url_valid("javascript:alert(1)", SCHEMES));
    assert!(!is_url_valid("data:text/html,hi", SCHEMES));
}

#[test]
fn test_relative_urls_accepted() {
    assert!(is_url_valid("docs/readme.md", SCHEMES));
    assert!(is_url_valid("/absolute/path", SCHEMES));
    assert!(is_url_valid("#fragment", SCHEMES));
}

#[test]
fn test_colon_in_path_is_not_a_scheme() {
    assert!(is_url_valid("path/with:colon", SCHEMES));
}

#[test]
fn test_malformed_scheme_rejected() {
    assert!(!is_url_valid("bad scheme:x", SCHEMES));
    assert!(!is_url_valid(":no-scheme", SCHEMES));
}
