//! Integration tests for the line index

use linemark_core::line_block::{LineBlock, LineBlockPosition};
use linemark_core::Span;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_indexes_lines() {
    let lb = LineBlock::new("Hallo\nWelt\nHello\nWorld");
    assert_eq!(lb.line_count(), 4);
    // Sum of line lengths plus one separator between each adjacent pair.
    assert_eq!(lb.text_len(), 5 + 4 + 5 + 5 + 3);
    let lines: Vec<&str> = lb.lines().collect();
    assert_eq!(lines, vec!["Hallo", "Welt", "Hello", "World"]);
}

#[test]
fn test_new_empty_input_is_one_empty_line() {
    let lb = LineBlock::new("");
    assert_eq!(lb.line_count(), 1);
    assert_eq!(lb.text_len(), 0);
    assert_eq!(lb.line(0), "");
}

#[test]
fn test_new_trailing_newline_yields_trailing_empty_line() {
    let lb = LineBlock::new("one\n");
    assert_eq!(lb.line_count(), 2);
    assert_eq!(lb.line(0), "one");
    assert_eq!(lb.line(1), "");
}

#[test]
fn test_mixed_line_endings_count_one_logical_separator() {
    let lb = LineBlock::new("a\r\nb\nc");
    assert_eq!(lb.line_count(), 3);
    // The \r\n separator still counts as a single logical character.
    assert_eq!(lb.text_len(), 1 + 1 + 1 + 2);
    assert_eq!(lb.line(0), "a");
    assert_eq!(lb.line(1), "b");
    assert_eq!(lb.line(2), "c");
}

#[test]
fn test_line_spans_are_absolute() {
    let lb = LineBlock::new("ab\ncd");
    assert_eq!(lb.line_span(0).start, 0);
    assert_eq!(lb.line_span(0).end, 2);
    assert_eq!(lb.line_span(1).start, 3);
    assert_eq!(lb.line_span(1).end, 5);
}

// ============================================================================
// Slicing
// ============================================================================

#[test]
fn test_slice_identity() {
    let lb = LineBlock::new("Hallo\nWelt\nHello\nWorld");
    let sliced = lb.slice_text(0..lb.text_len());
    assert_eq!(sliced, lb);
}

#[test]
fn test_slice_within_one_line() {
    let lb = LineBlock::new("Hallo\nWelt");
    let sliced = lb.slice_text(1..4);
    assert_eq!(sliced.line_count(), 1);
    assert_eq!(sliced.line(0), "all");
}

#[test]
fn test_slice_across_separator() {
    let lb = LineBlock::new("Hallo\nWelt");
    // Logical offsets 3..8 cover "lo", the separator, and "We".
    let sliced = lb.slice_text(3..8);
    assert_eq!(sliced.line_count(), 2);
    assert_eq!(sliced.line(0), "lo");
    assert_eq!(sliced.line(1), "We");
}

#[test]
fn test_zero_width_slice_is_one_empty_line() {
    let lb = LineBlock::new("Hallo\nWelt");
    let sliced = lb.slice_text(3..3);
    assert_eq!(sliced.line_count(), 1);
    assert_eq!(sliced.line(0), "");
    assert_eq!(sliced.text_len(), 0);
}

#[test]
fn test_slice_composes() {
    let lb = LineBlock::new("aaa\nbbb\nccc\nddd");
    let once = lb.slice_text(2..13);
    let twice = once.slice_text(2..7);
    let direct = lb.slice_text(4..9);
    assert_eq!(twice, direct);
}

#[test]
fn test_slice_text_from() {
    let lb = LineBlock::new("one\ntwo");
    let sliced = lb.slice_text_from(4);
    assert_eq!(sliced.line_count(), 1);
    assert_eq!(sliced.line(0), "two");
}

#[test]
#[should_panic]
fn test_slice_out_of_range_panics() {
    let lb = LineBlock::new("abc");
    let _ = lb.slice_text(0..4);
}

#[test]
fn test_slice_lines() {
    let lb = LineBlock::new("a\nb\nc\nd");
    let mid = lb.slice_lines(1..3);
    assert_eq!(mid.line_count(), 2);
    assert_eq!(mid.line(0), "b");
    assert_eq!(mid.line(1), "c");
}

// ============================================================================
// Marker stripping
// ============================================================================

#[test]
fn test_remove_from_line_start() {
    let lb = LineBlock::new("  one\n  two");
    let stripped = lb.remove_from_line_start(2);
    assert_eq!(stripped.line(0), "one");
    assert_eq!(stripped.line(1), "two");
}

#[test]
fn test_remove_from_line_start_clamps_short_lines() {
    let lb = LineBlock::new("    deep\nx");
    let stripped = lb.remove_from_line_start(4);
    assert_eq!(stripped.line(0), "deep");
    // A line shorter than the cut becomes empty, not an error.
    assert_eq!(stripped.line(1), "");
}

#[test]
fn test_remove_from_line_end() {
    let lb = LineBlock::new("one##\ntwo##");
    let stripped = lb.remove_from_line_end(2);
    assert_eq!(stripped.line(0), "one");
    assert_eq!(stripped.line(1), "two");
}

#[test]
fn test_remove_widens_to_char_boundary() {
    let lb = LineBlock::new("über");
    // A cut of 1 lands inside the two-byte 'ü' and widens past it.
    let stripped = lb.remove_from_line_start(1);
    assert_eq!(stripped.line(0), "ber");
}

// ============================================================================
// Coordinates
// ============================================================================

#[test]
fn test_position_of_and_offset_of_roundtrip() {
    let lb = LineBlock::new("ab\ncde\nf");
    for offset in 0..=lb.text_len() {
        let pos = lb.position_of(offset);
        assert_eq!(lb.offset_of(pos), offset);
    }
}

#[test]
fn test_position_of_separator_maps_to_line_end() {
    let lb = LineBlock::new("ab\ncd");
    assert_eq!(lb.position_of(2), LineBlockPosition { line: 0, column: 2 });
    assert_eq!(lb.position_of(3), LineBlockPosition { line: 1, column: 0 });
}

#[test]
fn test_byte_at_reads_separator_as_newline() {
    let lb = LineBlock::new("a\r\nb");
    assert_eq!(lb.byte_at(0), Some(b'a'));
    assert_eq!(lb.byte_at(1), Some(b'\n'));
    assert_eq!(lb.byte_at(2), Some(b'b'));
    assert_eq!(lb.byte_at(3), None);
}

#[test]
fn test_find_byte_crosses_lines() {
    let lb = LineBlock::new("abc\ndxd");
    assert_eq!(lb.find_byte(b'd', 0), Some(4));
    assert_eq!(lb.find_byte(b'd', 5), Some(6));
    assert_eq!(lb.find_byte(b'\n', 0), Some(3));
    assert_eq!(lb.find_byte(b'z', 0), None);
}

// ============================================================================
// Text extraction
// ============================================================================

#[test]
fn test_to_text_single_line_borrows() {
    let lb = LineBlock::new("hello");
    match lb.to_text() {
        std::borrow::Cow::Borrowed(s) => assert_eq!(s, "hello"),
        std::borrow::Cow::Owned(_) => panic!("single-line view should borrow"),
    }
}

#[test]
fn test_to_text_joins_with_newline() {
    let lb = LineBlock::new("a\r\nb\nc");
    assert_eq!(lb.to_text().as_ref(), "a\nb\nc");
}

#[test]
fn test_text_range() {
    let lb = LineBlock::new("Hallo\nWelt");
    assert_eq!(lb.text_range(0, 5).as_ref(), "Hallo");
    assert_eq!(lb.text_range(3, 8).as_ref(), "lo\nWe");
}

#[test]
fn test_display_matches_to_text() {
    let lb = LineBlock::new("x\ny");
    assert_eq!(lb.to_string(), "x\ny");
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_span_merge_covers_both() {
    let a = Span::new(2, 5);
    let b = Span::new(9, 12);
    assert_eq!(a.merge(b), Span::new(2, 12));
    assert_eq!(b.merge(a), Span::new(2, 12));
    assert_eq!(a.merge(a), a);
}

#[test]
fn test_zero_width_span_is_empty() {
    assert!(Span::new(4, 4).is_empty());
    assert_eq!(Span::new(4, 4).len(), 0);
    assert!(!Span::new(4, 5).is_empty());
    assert_eq!(Span::new(4, 5).len(), 1);
}

#[test]
fn test_block_span_covers_first_to_last_line() {
    let lb = LineBlock::new("Hallo\r\nWelt");
    assert_eq!(lb.span(), lb.line_span(0).merge(lb.line_span(1)));
    assert_eq!(lb.span(), Span::new(0, 11));
}
