//! Slice-based line indexing over document text.
//!
//! A [`LineBlock`] is an immutable view over a borrowed text buffer,
//! decomposed into lines. The buffer is never copied: every line is an
//! absolute byte span into the original input, so AST spans survive any
//! amount of slicing and marker stripping. All transformations return a new
//! `LineBlock`; the original is untouched.
//!
//! # Coordinates
//!
//! A block exposes *logical* offsets: it behaves as if its lines were joined
//! by a single `\n`, so a `\r\n` separator in the underlying buffer counts
//! as one logical character. [`LineBlock::text_len`] is the length of that
//! logical text, and [`LineBlock::slice_text`] addresses it. This is what
//! keeps slicing well-behaved over documents with mixed line endings.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use memchr::memchr;

use crate::common::find_next_single_newline;
use crate::span::Span;

/// A line/column address within a [`LineBlock`].
///
/// `column` is a byte offset into the line; a column equal to the line
/// length addresses the separator after the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineBlockPosition {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub column: usize,
}

/// An immutable, zero-copy view over document text, indexed by line.
///
/// Constructed once per document in a single O(n) pass; every subsequent
/// transformation ([`slice_text`](Self::slice_text),
/// [`remove_from_line_start`](Self::remove_from_line_start),
/// [`remove_from_line_end`](Self::remove_from_line_end),
/// [`slice_lines`](Self::slice_lines)) produces a new instance sharing the
/// same buffer.
///
/// A block always holds at least one line; slicing to zero width yields one
/// line of length zero, never zero lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock<'a> {
    text: &'a str,
    lines: Vec<Span>,
}

impl<'a> LineBlock<'a> {
    /// Build the full line index for `text`.
    ///
    /// Lines are delimited by `\n` or `\r\n`; both may appear within one
    /// document. The line count is always the number of breaks plus one, so
    /// empty input yields a single empty line and a trailing newline yields
    /// a trailing empty line.
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::with_capacity(16);
        let mut start = 0;
        while let Some((break_pos, next_start)) = find_next_single_newline(text, start, text.len())
        {
            lines.push(Span::new(start as u32, break_pos as u32));
            start = next_start;
        }
        lines.push(Span::new(start as u32, text.len() as u32));
        Self { text, lines }
    }

    /// Construct from pre-computed line spans. Spans must be ordered, lie
    /// within `text`, and exclude newline bytes; the vector must be
    /// non-empty.
    pub(crate) fn from_parts(text: &'a str, lines: Vec<Span>) -> Self {
        debug_assert!(!lines.is_empty());
        debug_assert!(lines.iter().all(|l| (l.end as usize) <= text.len()));
        Self { text, lines }
    }

    /// The underlying buffer this view borrows from.
    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.text
    }

    /// Number of lines in the current view.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the logical text: the sum of line lengths plus one
    /// separator between each pair of adjacent lines.
    #[inline]
    pub fn text_len(&self) -> usize {
        let content: usize = self.lines.iter().map(|l| l.len() as usize).sum();
        content + (self.lines.len() - 1)
    }

    /// The i-th line as a borrowed slice of the underlying buffer.
    ///
    /// # Panics
    ///
    /// Panics if `i >= line_count()`.
    #[inline]
    pub fn line(&self, i: usize) -> &'a str {
        self.slice_abs(self.lines[i])
    }

    /// The absolute byte span of the i-th line in the original buffer.
    #[inline]
    pub fn line_span(&self, i: usize) -> Span {
        self.lines[i]
    }

    /// Iterate over the lines as borrowed slices.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.lines
            .iter()
            .map(move |&l| &text[l.start as usize..l.end as usize])
    }

    /// Absolute byte span covering the whole view, from the start of the
    /// first line to the end of the last.
    #[inline]
    pub fn span(&self) -> Span {
        self.lines[0].merge(self.lines[self.lines.len() - 1])
    }

    #[inline]
    fn slice_abs(&self, span: Span) -> &'a str {
        let text = self.text;
        &text[span.start as usize..span.end as usize]
    }

    /// Restrict the view to the logical range starting at `start`,
    /// through the end of the block.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds `text_len()`.
    pub fn slice_text_from(&self, start: usize) -> LineBlock<'a> {
        self.slice_text(start..self.text_len())
    }

    /// Restrict the view to a logical sub-range.
    ///
    /// Lines partially covered by the range are trimmed; a line reduced to
    /// zero width by the cut is still reported. A zero-width slice yields a
    /// single empty line at that position.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds `text_len()` or is inverted.
    pub fn slice_text(&self, range: impl RangeBounds<usize>) -> LineBlock<'a> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.text_len(),
        };
        assert!(
            start <= end && end <= self.text_len(),
            "slice {}..{} out of range for line block of length {}",
            start,
            end,
            self.text_len()
        );

        let mut out = Vec::with_capacity(self.lines.len());
        let mut lo = 0usize;
        for &line in &self.lines {
            let len = line.len() as usize;
            let hi = lo + len;
            let a = start.max(lo);
            let b = end.min(hi);
            if a <= b {
                let byte_a = line.start as usize + (a - lo);
                let byte_b = line.start as usize + (b - lo);
                debug_assert!(self.text.is_char_boundary(byte_a));
                debug_assert!(self.text.is_char_boundary(byte_b));
                out.push(Span::new(byte_a as u32, byte_b as u32));
            }
            lo = hi + 1;
        }
        debug_assert!(!out.is_empty());
        LineBlock {
            text: self.text,
            lines: out,
        }
    }

    /// Restrict the view to a contiguous run of whole lines.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or exceeds `line_count()`.
    pub fn slice_lines(&self, range: std::ops::Range<usize>) -> LineBlock<'a> {
        assert!(
            range.start < range.end && range.end <= self.lines.len(),
            "line slice {}..{} out of range for {} lines",
            range.start,
            range.end,
            self.lines.len()
        );
        LineBlock {
            text: self.text,
            lines: self.lines[range].to_vec(),
        }
    }

    /// Remove up to `n` bytes from the start of every line independently.
    ///
    /// Lines shorter than `n` become empty; the count never goes negative.
    /// If the cut would split a multi-byte character, it is widened to the
    /// next character boundary.
    pub fn remove_from_line_start(&self, n: usize) -> LineBlock<'a> {
        let lines = self
            .lines
            .iter()
            .map(|&l| {
                let len = l.len() as usize;
                let mut cut = l.start as usize + n.min(len);
                while cut < l.end as usize && !self.text.is_char_boundary(cut) {
                    cut += 1;
                }
                Span::new(cut as u32, l.end)
            })
            .collect();
        LineBlock {
            text: self.text,
            lines,
        }
    }

    /// Remove up to `n` bytes from the end of every line independently.
    ///
    /// The counterpart of [`remove_from_line_start`](Self::remove_from_line_start);
    /// a cut landing inside a multi-byte character is widened to the
    /// previous character boundary.
    pub fn remove_from_line_end(&self, n: usize) -> LineBlock<'a> {
        let lines = self
            .lines
            .iter()
            .map(|&l| {
                let len = l.len() as usize;
                let mut cut = l.end as usize - n.min(len);
                while cut > l.start as usize && !self.text.is_char_boundary(cut) {
                    cut -= 1;
                }
                Span::new(l.start, cut as u32)
            })
            .collect();
        LineBlock {
            text: self.text,
            lines,
        }
    }

    /// Convert a logical offset to a line/column position.
    ///
    /// An offset addressing a separator maps to the end column of the line
    /// before it.
    ///
    /// # Panics
    ///
    /// Panics if `offset > text_len()`.
    pub fn position_of(&self, offset: usize) -> LineBlockPosition {
        let mut lo = 0usize;
        for (i, line) in self.lines.iter().enumerate() {
            let hi = lo + line.len() as usize;
            if offset <= hi {
                return LineBlockPosition {
                    line: i,
                    column: offset - lo,
                };
            }
            lo = hi + 1;
        }
        panic!(
            "offset {} out of range for line block of length {}",
            offset,
            self.text_len()
        );
    }

    /// Convert a line/column position back to a logical offset.
    pub fn offset_of(&self, pos: LineBlockPosition) -> usize {
        let mut lo = 0usize;
        for line in &self.lines[..pos.line] {
            lo += line.len() as usize + 1;
        }
        lo + pos.column
    }

    /// The absolute byte offset in the original buffer for a logical offset.
    ///
    /// Separator offsets map to the byte just past the preceding line's
    /// content.
    pub fn byte_offset(&self, offset: usize) -> u32 {
        let pos = self.position_of(offset);
        self.lines[pos.line].start + pos.column as u32
    }

    /// The byte at a logical offset, or `None` at the end of the block.
    /// Separator positions read as `\n` regardless of the bytes in the
    /// underlying buffer.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.text_len() {
            return None;
        }
        let pos = self.position_of(offset);
        let line = self.lines[pos.line];
        if pos.column < line.len() as usize {
            Some(self.text.as_bytes()[line.start as usize + pos.column])
        } else {
            Some(b'\n')
        }
    }

    /// Find the next occurrence of `needle` at or after logical offset
    /// `from`. Separators match when searching for `\n`.
    pub fn find_byte(&self, needle: u8, from: usize) -> Option<usize> {
        let start = self.position_of(from.min(self.text_len()));
        let mut lo = from - start.column;
        for i in start.line..self.lines.len() {
            let line = self.line(i);
            let from_col = if i == start.line { start.column } else { 0 };
            if from_col <= line.len() {
                if let Some(f) = memchr(needle, &line.as_bytes()[from_col..]) {
                    return Some(lo + from_col + f);
                }
            }
            if i + 1 < self.lines.len() {
                if needle == b'\n' {
                    return Some(lo + line.len());
                }
                lo += line.len() + 1;
            }
        }
        None
    }

    /// Extract a logical sub-range as text.
    ///
    /// Borrows from the underlying buffer when the range lies within a
    /// single line; ranges crossing a separator are materialized with `\n`
    /// separators.
    pub fn text_range(&self, start: usize, end: usize) -> Cow<'a, str> {
        self.slice_text(start..end).to_text()
    }

    /// Materialize the whole view as text, joining lines with `\n`.
    ///
    /// A single-line view borrows from the underlying buffer.
    pub fn to_text(&self) -> Cow<'a, str> {
        if self.lines.len() == 1 {
            return Cow::Borrowed(self.line(0));
        }
        let mut out = String::with_capacity(self.text_len());
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        Cow::Owned(out)
    }
}

impl fmt::Display for LineBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
