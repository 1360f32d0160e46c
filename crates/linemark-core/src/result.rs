//! Parse-result wrappers pairing a node with the source range it consumed.
//!
//! The parsers advance their cursor by exactly the consumed amount reported
//! here, which is what guarantees forward-only progress and therefore
//! termination. Both wrappers are transient: they are unwrapped as soon as
//! the cursor moves, and only the parsed element survives into the tree.

/// A block-level match: the parsed element plus the half-open line range
/// `[line_start, line_end)` it consumed.
#[derive(Debug)]
pub struct BlockParseResult<T> {
    /// The parsed block element.
    pub element: T,
    /// First line consumed (inclusive).
    pub line_start: usize,
    /// One past the last line consumed.
    pub line_end: usize,
}

impl<T> BlockParseResult<T> {
    /// Pair an element with its consumed line range.
    ///
    /// Block matches are never zero-width; an empty range is a parser bug.
    #[inline]
    pub fn new(element: T, line_start: usize, line_end: usize) -> Self {
        debug_assert!(line_end > line_start, "block match consumed no lines");
        Self {
            element,
            line_start,
            line_end,
        }
    }
}

/// An inline-level match: the parsed element plus the half-open logical
/// byte range `[start, end)` it consumed.
#[derive(Debug)]
pub struct InlineParseResult<T> {
    /// The parsed inline element.
    pub element: T,
    /// Logical offset where the match begins (inclusive).
    pub start: usize,
    /// Logical offset one past the match.
    pub end: usize,
}

impl<T> InlineParseResult<T> {
    /// Pair an element with its consumed logical range.
    ///
    /// Inline matches are never zero-width; an empty range is a parser bug.
    #[inline]
    pub fn new(element: T, start: usize, end: usize) -> Self {
        debug_assert!(end > start, "inline match consumed no input");
        Self {
            element,
            start,
            end,
        }
    }
}
