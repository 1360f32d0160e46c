//! Byte spans locating AST nodes in the source document.

/// A half-open byte range `[start, end)` into the input text.
///
/// Offsets are bytes, not characters, stored as `u32` to keep AST nodes
/// compact. Nodes composed from several lines build their span with
/// [`merge`](Self::merge).
///
/// # Example
///
/// ```rust
/// use linemark_core::Span;
///
/// let heading = Span::new(0, 7);
/// let body = Span::new(9, 13);
/// assert_eq!(heading.merge(body), Span::new(0, 13));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers zero bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
