//! Trip-character driven inline parser.
//!
//! Scans a block's line-run left to right. At each position whose byte is
//! registered in the [`TripChart`], the candidate rules are attempted in
//! priority order and the first successful match wins; the cursor then jumps
//! past the consumed range. Text between matches accumulates into literal
//! text nodes. A rule that finds no valid closing delimiter fails and falls
//! through, so unbalanced markup degrades to literal text instead of
//! consuming input.
//!
//! Positions are logical [`LineBlock`] offsets; node spans are absolute
//! byte spans into the original document.

use std::borrow::Cow;
use std::ops::Range;

use crate::ast::{CodeSpan, Emphasis, Image, Inline, Link, Strong, Text};
use crate::common;
use crate::line_block::LineBlock;
use crate::result::InlineParseResult;
use crate::span::Span;
use crate::trip::{InlineRule, TripChart};

/// Read-only configuration shared by every inline parse in a document.
pub(crate) struct InlineContext<'p> {
    pub chart: &'p TripChart,
    pub known_schemes: &'p [String],
}

/// Parse the inline elements of a block's line-run.
pub(crate) fn parse_inlines<'a>(block: &LineBlock<'a>, ctx: &InlineContext<'_>) -> Vec<Inline<'a>> {
    if block.text_len() == 0 {
        return Vec::new();
    }
    let scanner = InlineScanner {
        block,
        ctx,
        len: block.text_len(),
    };
    scanner.parse()
}

struct InlineScanner<'b, 'a, 'p> {
    block: &'b LineBlock<'a>,
    ctx: &'b InlineContext<'p>,
    len: usize,
}

impl<'b, 'a, 'p> InlineScanner<'b, 'a, 'p> {
    fn parse(&self) -> Vec<Inline<'a>> {
        let mut out = Vec::with_capacity(8);
        let mut text_start = 0usize;
        let mut pos = 0usize;
        let mut line_idx = 0usize;
        let mut line_lo = 0usize;

        loop {
            let line = self.block.line(line_idx);
            let col = pos - line_lo;

            if col < line.len() {
                match self.ctx.chart.find_next_trip(&line.as_bytes()[col..]) {
                    Some(off) => {
                        pos = line_lo + col + off;
                        let b = line.as_bytes()[col + off];
                        if let Some(res) = self.try_rules(b, pos) {
                            self.flush_text(&mut out, text_start, pos);
                            out.push(res.element);
                            pos = res.end;
                            text_start = pos;
                            let p = self.block.position_of(pos);
                            line_idx = p.line;
                            line_lo = pos - p.column;
                        } else {
                            pos += 1;
                        }
                        continue;
                    }
                    None => pos = line_lo + line.len(),
                }
            }

            if line_idx + 1 >= self.block.line_count() {
                break;
            }

            // Two trailing spaces before a line boundary make a hard break.
            let trailing = line.len() - line.trim_end_matches(' ').len();
            let separator = line_lo + line.len();
            if trailing >= 2 {
                let break_start = separator - trailing;
                self.flush_text(&mut out, text_start, break_start);
                let span = Span::new(
                    self.block.byte_offset(break_start),
                    self.block.line_span(line_idx + 1).start,
                );
                out.push(Inline::LineBreak(span));
                text_start = separator + 1;
            }
            pos = separator + 1;
            line_idx += 1;
            line_lo = pos;
        }

        self.flush_text(&mut out, text_start, self.len);
        out
    }

    fn flush_text(&self, out: &mut Vec<Inline<'a>>, start: usize, end: usize) {
        if start >= end {
            return;
        }
        out.push(Inline::Text(Text {
            content: self.block.text_range(start, end),
            span: self.span_of(start, end),
        }));
    }

    #[inline]
    fn span_of(&self, start: usize, end: usize) -> Span {
        Span::new(self.block.byte_offset(start), self.block.byte_offset(end))
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.block.byte_at(pos)
    }

    fn try_rules(&self, b: u8, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        for &rule in self.ctx.chart.rules_for(b) {
            let res = match rule {
                InlineRule::Escape => self.try_escape(pos),
                InlineRule::CodeSpan => self.try_code_span(pos),
                InlineRule::Image => self.try_image(pos),
                InlineRule::Link => self.try_link(pos),
                InlineRule::Strong => self.try_strong(pos),
                InlineRule::Emphasis => self.try_emphasis(pos),
            };
            if res.is_some() {
                return res;
            }
        }
        None
    }

    /// `\x` where x is ASCII punctuation: the punctuation becomes literal
    /// text and the backslash is dropped.
    fn try_escape(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        let next = self.byte_at(pos + 1)?;
        if !next.is_ascii_punctuation() {
            return None;
        }
        let element = Inline::Text(Text {
            content: self.block.text_range(pos + 1, pos + 2),
            span: self.span_of(pos + 1, pos + 2),
        });
        Some(InlineParseResult::new(element, pos, pos + 2))
    }

    /// `` `code` ``: content is taken raw, never inline-parsed.
    fn try_code_span(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        let close = self.block.find_byte(b'`', pos + 1)?;
        let element = Inline::CodeSpan(CodeSpan {
            content: self.block.text_range(pos + 1, close),
            span: self.span_of(pos, close + 1),
        });
        Some(InlineParseResult::new(element, pos, close + 1))
    }

    /// `[label](url "title")`. The label is recursively inline-parsed; the
    /// destination must pass the scheme allow-list or the rule fails.
    fn try_link(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        let close = self.find_closing_bracket(pos)?;
        if self.byte_at(close + 1) != Some(b'(') {
            return None;
        }
        let paren_close = self.block.find_byte(b')', close + 2)?;
        let (url, title) = self.destination(close + 2, paren_close)?;

        let label = if close > pos + 1 {
            let label_block = self.block.slice_text(pos + 1..close);
            parse_inlines(&label_block, self.ctx)
        } else {
            Vec::new()
        };

        let element = Inline::Link(Link {
            label,
            url,
            title,
            span: self.span_of(pos, paren_close + 1),
        });
        Some(InlineParseResult::new(element, pos, paren_close + 1))
    }

    /// `![alt](src)`. Alt text is plain, not inline-parsed.
    fn try_image(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        if self.byte_at(pos + 1) != Some(b'[') {
            return None;
        }
        let close = self.block.find_byte(b']', pos + 2)?;
        if self.byte_at(close + 1) != Some(b'(') {
            return None;
        }
        let paren_close = self.block.find_byte(b')', close + 2)?;
        let (src, _) = self.destination(close + 2, paren_close)?;

        let element = Inline::Image(Image {
            alt: self.block.text_range(pos + 2, close),
            src,
            span: self.span_of(pos, paren_close + 1),
        });
        Some(InlineParseResult::new(element, pos, paren_close + 1))
    }

    /// `**strong**` / `__strong__` with recursively parsed content.
    fn try_strong(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        let d = self.byte_at(pos)?;
        if self.byte_at(pos + 1) != Some(d) {
            return None;
        }
        let content_start = pos + 2;
        if self.byte_at(content_start).map_or(true, |b| b == b' ') {
            return None;
        }

        let mut i = content_start + 1;
        loop {
            let c = self.block.find_byte(d, i)?;
            if self.byte_at(c + 1) == Some(d)
                && c > content_start
                && self.byte_at(c - 1) != Some(b' ')
            {
                let inner_block = self.block.slice_text(content_start..c);
                let content = parse_inlines(&inner_block, self.ctx);
                let element = Inline::Strong(Strong {
                    content,
                    span: self.span_of(pos, c + 2),
                });
                return Some(InlineParseResult::new(element, pos, c + 2));
            }
            i = c + 1;
        }
    }

    /// `*emphasis*` / `_emphasis_` with recursively parsed content.
    fn try_emphasis(&self, pos: usize) -> Option<InlineParseResult<Inline<'a>>> {
        let d = self.byte_at(pos)?;
        let content_start = pos + 1;
        if self.byte_at(content_start).map_or(true, |b| b == b' ' || b == d) {
            return None;
        }

        let mut i = content_start + 1;
        loop {
            let c = self.block.find_byte(d, i)?;
            // Skip doubled delimiters; they belong to a strong run.
            if self.byte_at(c + 1) == Some(d) {
                i = c + 2;
                continue;
            }
            if c > content_start && self.byte_at(c - 1) != Some(b' ') {
                let inner_block = self.block.slice_text(content_start..c);
                let content = parse_inlines(&inner_block, self.ctx);
                let element = Inline::Emphasis(Emphasis {
                    content,
                    span: self.span_of(pos, c + 1),
                });
                return Some(InlineParseResult::new(element, pos, c + 1));
            }
            i = c + 1;
        }
    }

    /// Find the `]` matching the `[` at `open`, honoring nested brackets.
    fn find_closing_bracket(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = open + 1;
        loop {
            let rb = self.block.find_byte(b']', i)?;
            match self.block.find_byte(b'[', i) {
                Some(lb) if lb < rb => {
                    depth += 1;
                    i = lb + 1;
                }
                _ => {
                    if depth == 0 {
                        return Some(rb);
                    }
                    depth -= 1;
                    i = rb + 1;
                }
            }
        }
    }

    /// Split the parenthesized destination `[start, end)` into a URL and an
    /// optional quoted title, validating the URL scheme. Fails on an empty
    /// destination or a disallowed scheme.
    fn destination(
        &self,
        start: usize,
        end: usize,
    ) -> Option<(Cow<'a, str>, Option<Cow<'a, str>>)> {
        let inside = self.block.text_range(start, end);
        let (url_range, title_range) = split_destination(&inside)?;
        let (url, title) = match inside {
            Cow::Borrowed(s) => (
                Cow::Borrowed(&s[url_range]),
                title_range.map(|r| Cow::Borrowed(&s[r])),
            ),
            Cow::Owned(s) => (
                Cow::Owned(s[url_range].to_string()),
                title_range.map(|r| Cow::Owned(s[r].to_string())),
            ),
        };
        if !common::is_url_valid(&url, self.ctx.known_schemes) {
            return None;
        }
        Some((url, title))
    }
}

/// Split a raw destination string into URL and optional `"title"` ranges.
fn split_destination(inside: &str) -> Option<(Range<usize>, Option<Range<usize>>)> {
    let trimmed = inside.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = inside.len() - inside.trim_start().len();

    let url_end = common::find_next_whitespace(trimmed, 0, trimmed.len()).unwrap_or(trimmed.len());
    let url_range = lead..lead + url_end;

    let rest = trimmed[url_end..].trim_start();
    let title_range = if rest.len() >= 2 && rest.starts_with('"') && rest.ends_with('"') {
        let title_start = lead + (trimmed.len() - rest.len()) + 1;
        Some(title_start..title_start + rest.len() - 2)
    } else {
        None
    };

    Some((url_range, title_range))
}
