//! Recursive-descent block parser over a [`LineBlock`].
//!
//! The parser walks the document line by line. At each position the block
//! rules are offered the line run in a fixed priority order -- code fence,
//! heading, thematic break, quote, list, table -- and the first rule that
//! claims the position wins. Lines no rule claims are swept into a
//! paragraph until a blank line or another rule pre-empts the sweep.
//!
//! Quotes and lists strip their marker or indentation from each contained
//! line and hand the reduced sub-block back into the block parser; the
//! sub-block is strictly smaller, which bounds the recursion, and a
//! configured depth limit guards against adversarial nesting on top of
//! that. Malformed constructs degrade to text or extend to the end of the
//! document; they never abort the parse.

use std::borrow::Cow;

use crate::ast::{
    Block, CodeBlock, ColumnAlignment, Document, Heading, List, ListItem, ListKind, Paragraph,
    Quote, Table, TableCell, TableRow,
};
use crate::error::{ParseError, ParseErrors};
use crate::inline::{parse_inlines, InlineContext};
use crate::line_block::LineBlock;
use crate::parser::ParserOptions;
use crate::result::BlockParseResult;
use crate::span::Span;
use crate::trip::TripChart;

pub(crate) struct BlockParser<'p> {
    options: &'p ParserOptions,
    chart: &'p TripChart,
    errors: &'p mut ParseErrors,
}

/// A recognized list marker and the layout it implies.
#[derive(Debug, Clone, Copy)]
struct ListMarker {
    kind: ListKind,
    number: Option<u64>,
    /// Leading whitespace before the marker.
    indent: usize,
    /// Column where the item content begins; continuation lines must be
    /// indented at least this far.
    content_col: usize,
}

impl<'p> BlockParser<'p> {
    pub(crate) fn new(
        options: &'p ParserOptions,
        chart: &'p TripChart,
        errors: &'p mut ParseErrors,
    ) -> Self {
        Self {
            options,
            chart,
            errors,
        }
    }

    fn inline_ctx(&self) -> InlineContext<'_> {
        InlineContext {
            chart: self.chart,
            known_schemes: &self.options.known_schemes,
        }
    }

    pub(crate) fn parse_document<'a>(&mut self, input: &'a str) -> Document<'a> {
        let lines = LineBlock::new(input);
        let blocks = self.parse_blocks(&lines, 0);
        Document {
            blocks,
            span: Span::new(0, input.len() as u32),
        }
    }

    /// Parse a line run into blocks. `depth` counts quote/list recursion
    /// levels; past the configured maximum the content is flattened into a
    /// single paragraph instead of recursing further.
    fn parse_blocks<'a>(&mut self, lines: &LineBlock<'a>, depth: usize) -> Vec<Block<'a>> {
        if depth >= self.options.max_nesting_depth {
            self.errors.push(ParseError::nesting_too_deep(
                self.options.max_nesting_depth,
                Some(lines.span()),
            ));
            return self.flat_paragraph(lines).into_iter().collect();
        }

        let mut blocks = Vec::with_capacity(8);
        let mut i = 0;
        while i < lines.line_count() {
            if is_blank(lines.line(i)) {
                i += 1;
                continue;
            }
            let result = self.parse_block(lines, i, depth);
            debug_assert!(result.line_end > i);
            i = result.line_end;
            blocks.push(result.element);
        }
        blocks
    }

    fn parse_block<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
        depth: usize,
    ) -> BlockParseResult<Block<'a>> {
        if let Some(r) = self.try_code_fence(lines, i) {
            return r;
        }
        if let Some(r) = self.try_heading(lines, i) {
            return r;
        }
        if let Some(r) = self.try_thematic_break(lines, i) {
            return r;
        }
        if let Some(r) = self.try_quote(lines, i, depth) {
            return r;
        }
        if let Some(r) = self.try_list(lines, i, depth) {
            return r;
        }
        if let Some(r) = self.try_table(lines, i) {
            return r;
        }
        self.parse_paragraph(lines, i)
    }

    /// Whether another block rule would claim line `i`, pre-empting a
    /// paragraph sweep.
    fn looks_like_block_start(&self, lines: &LineBlock<'_>, i: usize) -> bool {
        let line = lines.line(i);
        is_fence(line)
            || heading_level(line).is_some()
            || is_thematic_break(line)
            || is_quote_line(line)
            || list_marker(line).is_some()
            || is_table_start(lines, i)
    }

    fn try_code_fence<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        let line = lines.line(i);
        let trimmed = line.trim_start();
        if !trimmed.starts_with("```") {
            return None;
        }
        let lang = trimmed[3..].trim();

        let mut close = None;
        let mut j = i + 1;
        while j < lines.line_count() {
            if lines.line(j).trim() == "```" {
                close = Some(j);
                break;
            }
            j += 1;
        }

        // Unterminated fences extend to the end of the document.
        let (content_end, block_end) = match close {
            Some(j) => (j, j + 1),
            None => {
                self.errors.push(ParseError::unclosed_delimiter(
                    "code fence",
                    Some(lines.line_span(i)),
                ));
                (lines.line_count(), lines.line_count())
            }
        };

        let content: Cow<'a, str> = if content_end > i + 1 {
            lines.slice_lines(i + 1..content_end).to_text()
        } else {
            Cow::Borrowed("")
        };

        let span = lines.line_span(i).merge(lines.line_span(block_end - 1));
        let element = Block::CodeBlock(CodeBlock {
            lang: Cow::Borrowed(lang),
            content,
            span,
        });
        Some(BlockParseResult::new(element, i, block_end))
    }

    fn try_heading<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        let line = lines.line(i);
        let (level, content_off) = heading_level(line)?;

        let trailing = line.len() - line.trim_end().len();
        let content_block = lines
            .slice_lines(i..i + 1)
            .remove_from_line_start(content_off)
            .remove_from_line_end(trailing);
        let content = parse_inlines(&content_block, &self.inline_ctx());

        let element = Block::Heading(Heading {
            level,
            content,
            span: lines.line_span(i),
        });
        Some(BlockParseResult::new(element, i, i + 1))
    }

    fn try_thematic_break<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        if !is_thematic_break(lines.line(i)) {
            return None;
        }
        let element = Block::ThematicBreak(lines.line_span(i));
        Some(BlockParseResult::new(element, i, i + 1))
    }

    fn try_quote<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
        depth: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        if !is_quote_line(lines.line(i)) {
            return None;
        }

        // Strip each line's own marker: leading whitespace, the '>', and at
        // most one following space. Marker widths may vary per line.
        let mut inner_spans = Vec::new();
        let mut j = i;
        while j < lines.line_count() && is_quote_line(lines.line(j)) {
            let line = lines.line(j);
            let span = lines.line_span(j);
            let marker = line.len() - line.trim_start().len();
            let mut content = marker + 1;
            if line.as_bytes().get(content) == Some(&b' ') {
                content += 1;
            }
            let content = content.min(line.len());
            inner_spans.push(Span::new(span.start + content as u32, span.end));
            j += 1;
        }

        let inner = LineBlock::from_parts(lines.source(), inner_spans);
        let blocks = self.parse_blocks(&inner, depth + 1);

        let span = lines.line_span(i).merge(lines.line_span(j - 1));
        let element = Block::Quote(Quote { blocks, span });
        Some(BlockParseResult::new(element, i, j))
    }

    fn try_list<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
        depth: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        let first = list_marker(lines.line(i))?;

        // Item ranges as (start_line, end_line, content_col).
        let mut item_ranges: Vec<(usize, usize, usize)> = Vec::new();
        let mut cur_start = i;
        let mut cur_col = first.content_col;
        let mut j = i + 1;

        loop {
            if j >= lines.line_count() {
                break;
            }
            let line = lines.line(j);

            if is_blank(line) {
                // A blank run only continues the list if the next non-blank
                // line still belongs to it.
                let mut k = j + 1;
                while k < lines.line_count() && is_blank(lines.line(k)) {
                    k += 1;
                }
                if k >= lines.line_count() {
                    break;
                }
                let next = lines.line(k);
                let continues = match list_marker(next) {
                    Some(m) => m.indent == first.indent && m.kind == first.kind,
                    None => line_indent(next) >= cur_col,
                };
                if !continues {
                    break;
                }
                j = k;
                continue;
            }

            if let Some(m) = list_marker(line) {
                if m.indent < first.indent {
                    break;
                }
                if m.indent == first.indent {
                    if m.kind != first.kind {
                        break;
                    }
                    item_ranges.push((cur_start, j, cur_col));
                    cur_start = j;
                    cur_col = m.content_col;
                    j += 1;
                    continue;
                }
                // Deeper marker: continuation of the current item, the
                // recursive parse turns it into a nested list.
                j += 1;
                continue;
            }

            if line_indent(line) >= cur_col {
                j += 1;
                continue;
            }
            break;
        }
        item_ranges.push((cur_start, j, cur_col));

        let mut items = Vec::with_capacity(item_ranges.len());
        for &(s, e, col) in &item_ranges {
            let item_block = lines.slice_lines(s..e).remove_from_line_start(col);
            let blocks = self.parse_blocks(&item_block, depth + 1);
            items.push(ListItem {
                blocks,
                span: lines.line_span(s).merge(lines.line_span(e - 1)),
            });
        }

        let span = lines.line_span(i).merge(lines.line_span(j - 1));
        let element = Block::List(List {
            kind: first.kind,
            start: first.number,
            items,
            span,
        });
        Some(BlockParseResult::new(element, i, j))
    }

    fn try_table<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
    ) -> Option<BlockParseResult<Block<'a>>> {
        if !is_table_start(lines, i) {
            return None;
        }
        let alignments = parse_alignments(lines.line(i + 1));

        let mut rows = Vec::with_capacity(8);
        rows.push(self.parse_table_row(lines, i, true));

        let mut j = i + 2;
        while j < lines.line_count() {
            let line = lines.line(j);
            if is_blank(line) || !line.contains('|') {
                break;
            }
            rows.push(self.parse_table_row(lines, j, false));
            j += 1;
        }

        // Ragged rows stay in the table but are reported: consumers laying
        // out columns need to know the cell counts disagree.
        for row in &rows {
            if row.cells.len() != alignments.len() {
                self.errors
                    .push(ParseError::invalid_syntax("table row", Some(row.span)));
            }
        }

        let span = lines.line_span(i).merge(lines.line_span(j - 1));
        let element = Block::Table(Table {
            alignments,
            rows,
            span,
        });
        Some(BlockParseResult::new(element, i, j))
    }

    fn parse_table_row<'a>(&mut self, lines: &LineBlock<'a>, i: usize, header: bool) -> TableRow<'a> {
        let line = lines.line(i);
        let base = lines.line_span(i).start;
        let ctx = self.inline_ctx();

        let mut cells = Vec::with_capacity(8);
        for (a, b) in split_row_segments(line) {
            let seg = &line[a..b];
            let lead = seg.len() - seg.trim_start().len();
            let trimmed = seg.trim();
            let cell_span = Span::new(
                base + (a + lead) as u32,
                base + (a + lead + trimmed.len()) as u32,
            );
            let cell_block = LineBlock::from_parts(lines.source(), vec![cell_span]);
            cells.push(TableCell {
                content: parse_inlines(&cell_block, &ctx),
                span: cell_span,
            });
        }

        TableRow {
            cells,
            header,
            span: lines.line_span(i),
        }
    }

    fn parse_paragraph<'a>(
        &mut self,
        lines: &LineBlock<'a>,
        i: usize,
    ) -> BlockParseResult<Block<'a>> {
        let mut j = i + 1;
        while j < lines.line_count()
            && !is_blank(lines.line(j))
            && !self.looks_like_block_start(lines, j)
        {
            j += 1;
        }

        let content_block = strip_leading_ws(&lines.slice_lines(i..j));
        let content = parse_inlines(&content_block, &self.inline_ctx());

        let span = lines.line_span(i).merge(lines.line_span(j - 1));
        BlockParseResult::new(Block::Paragraph(Paragraph { content, span }), i, j)
    }

    /// Flatten a whole line run into one paragraph. Used past the nesting
    /// depth limit.
    fn flat_paragraph<'a>(&mut self, lines: &LineBlock<'a>) -> Option<Block<'a>> {
        if lines.lines().all(is_blank) {
            return None;
        }
        let content_block = strip_leading_ws(lines);
        let content = parse_inlines(&content_block, &self.inline_ctx());
        Some(Block::Paragraph(Paragraph {
            content,
            span: lines.span(),
        }))
    }
}

/// Remove each line's leading whitespace, keeping trailing whitespace so
/// hard breaks survive.
fn strip_leading_ws<'a>(lines: &LineBlock<'a>) -> LineBlock<'a> {
    let spans = (0..lines.line_count())
        .map(|i| {
            let line = lines.line(i);
            let span = lines.line_span(i);
            let lead = line.len() - line.trim_start().len();
            Span::new(span.start + lead as u32, span.end)
        })
        .collect();
    LineBlock::from_parts(lines.source(), spans)
}

fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b == b' ' || b == b'\t')
}

fn line_indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Recognize an ATX heading: 1-6 `#` followed by a space (or nothing).
/// Returns the level and the byte offset where the content starts.
fn heading_level(line: &str) -> Option<(u8, usize)> {
    let indent = line_indent(line);
    let trimmed = &line[indent..];
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let after_space = rest.len() - rest.trim_start().len();
    Some((level as u8, indent + level + after_space))
}

fn is_thematic_break(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return false;
    }
    let first = trimmed.as_bytes()[0];
    matches!(first, b'-' | b'*' | b'_') && trimmed.bytes().all(|b| b == first)
}

fn is_quote_line(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

fn list_marker(line: &str) -> Option<ListMarker> {
    let indent = line_indent(line);
    let rest = &line[indent..];
    let bytes = rest.as_bytes();

    if matches!(bytes.first(), Some(b'-' | b'*' | b'+')) && bytes.get(1) == Some(&b' ') {
        let spaces = rest[1..].len() - rest[1..].trim_start().len();
        return Some(ListMarker {
            kind: ListKind::Unordered,
            number: None,
            indent,
            content_col: indent + 1 + spaces,
        });
    }

    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && digits <= 9 {
        if let Some(&delim) = bytes.get(digits) {
            if (delim == b'.' || delim == b')') && bytes.get(digits + 1) == Some(&b' ') {
                let after = digits + 1;
                let spaces = rest[after..].len() - rest[after..].trim_start().len();
                return Some(ListMarker {
                    kind: ListKind::Ordered,
                    number: rest[..digits].parse().ok(),
                    indent,
                    content_col: indent + after + spaces,
                });
            }
        }
    }
    None
}

fn is_table_start(lines: &LineBlock<'_>, i: usize) -> bool {
    lines.line(i).contains('|')
        && i + 1 < lines.line_count()
        && is_table_separator(lines.line(i + 1))
}

/// A separator row: only pipes, dashes, colons, and whitespace, with at
/// least one dash and one pipe.
fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| matches!(b, b'|' | b'-' | b':' | b' ' | b'\t'))
        && trimmed.contains('-')
        && trimmed.contains('|')
}

/// Byte ranges of the cell segments of a table row, outer pipes excluded.
fn split_row_segments(line: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let lead = line_indent(line);
    let end = line.trim_end().len();

    let mut start = if bytes.get(lead) == Some(&b'|') {
        lead + 1
    } else {
        lead
    };
    let mut segments = Vec::with_capacity(8);
    let mut k = start;
    while k < end {
        if bytes[k] == b'|' {
            segments.push((start, k));
            start = k + 1;
            k = start;
        } else {
            k += 1;
        }
    }
    // A trailing pipe leaves an empty final segment; drop it.
    if start < end && !line[start..end].trim().is_empty() {
        segments.push((start, end));
    }
    segments
}

fn parse_alignments(separator: &str) -> Vec<ColumnAlignment> {
    split_row_segments(separator)
        .into_iter()
        .map(|(a, b)| {
            let seg = separator[a..b].trim();
            match (seg.starts_with(':'), seg.ends_with(':')) {
                (true, true) => ColumnAlignment::Center,
                (true, false) => ColumnAlignment::Left,
                (false, true) => ColumnAlignment::Right,
                (false, false) => ColumnAlignment::Unspecified,
            }
        })
        .collect()
}
