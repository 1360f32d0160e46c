//! Shared low-level scanning primitives.
//!
//! Pure functions over `&str` with no shared state, safe to call from any
//! thread. Searches are SIMD-accelerated via `memchr` where possible.
//!
//! All ranges are byte ranges of the form `[start, end)`. An `end` past the
//! text length is a caller bug: it trips a debug assertion, then is clamped
//! so release builds proceed with the valid prefix.

use memchr::{memchr, memmem, memrchr};

/// Clamp `end` to the text length, asserting in debug builds.
#[inline]
fn clamp_end(text: &str, end: usize) -> usize {
    debug_assert!(end <= text.len(), "scan end {} past text length {}", end, text.len());
    end.min(text.len())
}

/// Find the next line break in `[start, end)`.
///
/// Recognizes both `\n` and `\r\n`, treating a CRLF pair as a single logical
/// break. Returns `(break_pos, next_line_start)` where `break_pos` is the
/// first byte of the break (the `\r` of a CRLF) and `next_line_start` is the
/// offset just past the `\n`.
#[inline]
pub fn find_next_single_newline(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let end = clamp_end(text, end);
    if start >= end {
        return None;
    }
    let bytes = text.as_bytes();
    let nl = start + memchr(b'\n', &bytes[start..end])?;
    let break_pos = if nl > start && bytes[nl - 1] == b'\r' {
        nl - 1
    } else {
        nl
    };
    Some((break_pos, nl + 1))
}

/// Find the last line break in `[start, end)`.
///
/// CRLF-aware counterpart of [`find_next_single_newline`], scanning backward.
/// Returns `(break_pos, next_line_start)` for the last break in the range.
#[inline]
pub fn find_previous_single_newline(
    text: &str,
    start: usize,
    end: usize,
) -> Option<(usize, usize)> {
    let end = clamp_end(text, end);
    if start >= end {
        return None;
    }
    let bytes = text.as_bytes();
    let nl = start + memrchr(b'\n', &bytes[start..end])?;
    let break_pos = if nl > start && bytes[nl - 1] == b'\r' {
        nl - 1
    } else {
        nl
    };
    Some((break_pos, nl + 1))
}

/// Bounds-checked substring search restricted to `[start, end)`.
///
/// With `reverse` set, finds the last occurrence instead of the first.
/// Never panics on an oversized `end`; it is clamped (with a debug
/// assertion) and the search proceeds over the valid range.
#[inline]
pub fn index_of(text: &str, search: &str, start: usize, end: usize, reverse: bool) -> Option<usize> {
    let end = clamp_end(text, end);
    if start >= end || search.is_empty() {
        return None;
    }
    let haystack = &text.as_bytes()[start..end];
    let found = if reverse {
        memmem::rfind(haystack, search.as_bytes())
    } else {
        memmem::find(haystack, search.as_bytes())
    }?;
    Some(start + found)
}

#[inline(always)]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n'
}

/// Forward scan to the next whitespace byte in `[start, end)`.
#[inline]
pub fn find_next_whitespace(text: &str, start: usize, end: usize) -> Option<usize> {
    let end = clamp_end(text, end);
    text.as_bytes()[start..end]
        .iter()
        .position(|&b| is_ws(b))
        .map(|p| start + p)
}

/// Forward scan to the next non-whitespace byte in `[start, end)`.
#[inline]
pub fn find_next_non_whitespace(text: &str, start: usize, end: usize) -> Option<usize> {
    let end = clamp_end(text, end);
    text.as_bytes()[start..end]
        .iter()
        .position(|&b| !is_ws(b))
        .map(|p| start + p)
}

/// Validate a link target against a scheme allow-list.
///
/// An absolute URL is accepted only when its scheme appears in
/// `known_schemes` (compared ASCII case-insensitively). A relative URL --
/// one with no scheme before the first path separator -- is always accepted.
/// This blocks scheme injection (`javascript:`, `data:`, ...) in link
/// targets while leaving ordinary relative links alone.
pub fn is_url_valid<S: AsRef<str>>(url: &str, known_schemes: &[S]) -> bool {
    let colon = match url.find(':') {
        Some(c) => c,
        None => return true,
    };
    // A colon after the first slash is path content, not a scheme separator.
    if let Some(slash) = url.find('/') {
        if slash < colon {
            return true;
        }
    }
    let scheme = &url[..colon];
    if scheme.is_empty()
        || !scheme
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.')
    {
        return false;
    }
    known_schemes
        .iter()
        .any(|s| s.as_ref().eq_ignore_ascii_case(scheme))
}
