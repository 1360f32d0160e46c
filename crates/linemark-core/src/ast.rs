//! Abstract Syntax Tree types for parsed markdown documents.
//!
//! This module contains all the AST node types produced by the parser.
//! The AST is designed to be:
//!
//! - **Zero-copy**: Uses `Cow<'a, str>` to borrow from input when possible
//! - **Span-tracked**: Every node includes source location information
//! - **Closed**: The block and inline kinds are fixed enums, so consumers
//!   (renderers, serializers) can match exhaustively

use crate::span::Span;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// A parsed markdown document.
///
/// The document is the root of the AST and owns all content blocks in
/// source order. Ownership is strictly hierarchical: child nodes belong to
/// exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    /// Content blocks in document order.
    pub blocks: Vec<Block<'a>>,
    /// Source span covering the entire document.
    pub span: Span,
}

/// Block-level AST nodes.
///
/// Blocks are the primary structural elements of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<'a> {
    /// Text paragraph with inline formatting.
    Paragraph(Paragraph<'a>),
    /// ATX heading (levels 1-6).
    Heading(Heading<'a>),
    /// Ordered or unordered list.
    List(List<'a>),
    /// Block quotation (`>` prefixed lines).
    Quote(Quote<'a>),
    /// Fenced code block with optional language info string.
    CodeBlock(CodeBlock<'a>),
    /// Pipe table with optional column alignments.
    Table(Table<'a>),
    /// Horizontal rule / thematic break.
    ThematicBreak(Span),
}

impl Block<'_> {
    /// Source span of this block.
    pub fn span(&self) -> Span {
        match self {
            Block::Paragraph(p) => p.span,
            Block::Heading(h) => h.span,
            Block::List(l) => l.span,
            Block::Quote(q) => q.span,
            Block::CodeBlock(c) => c.span,
            Block::Table(t) => t.span,
            Block::ThematicBreak(s) => *s,
        }
    }
}

/// Text paragraph containing inline elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph<'a> {
    /// Inline content with formatting.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Section heading with level and inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading<'a> {
    /// Heading level (1-6).
    pub level: u8,
    /// Inline content (may include formatting).
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// List ordering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered list (`1.` / `1)`).
    Ordered,
    /// Bulleted list (`-`, `*`, or `+`).
    Unordered,
}

/// A list block containing one or more items.
#[derive(Debug, Clone, PartialEq)]
pub struct List<'a> {
    /// Ordered or unordered.
    pub kind: ListKind,
    /// Starting number, taken from the first marker of an ordered list.
    pub start: Option<u64>,
    /// List items.
    pub items: Vec<ListItem<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single list item. Items own nested blocks, so lists nest through
/// ordinary block recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem<'a> {
    /// Content blocks within the item.
    pub blocks: Vec<Block<'a>>,
    /// Source span.
    pub span: Span,
}

/// Block quotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote<'a> {
    /// Quoted content blocks.
    pub blocks: Vec<Block<'a>>,
    /// Source span.
    pub span: Span,
}

/// Fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock<'a> {
    /// Language identifier from the info string (e.g., "rust").
    pub lang: CowStr<'a>,
    /// Raw code content, not inline-parsed.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Column alignment from a table separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlignment {
    /// No alignment specified (`---`).
    Unspecified,
    /// Left-aligned (`:--`).
    Left,
    /// Centered (`:-:`).
    Center,
    /// Right-aligned (`--:`).
    Right,
}

/// Pipe table with header and body rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<'a> {
    /// Per-column alignment from the separator row.
    pub alignments: Vec<ColumnAlignment>,
    /// All table rows; the first is the header.
    pub rows: Vec<TableRow<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    /// Cells in this row.
    pub cells: Vec<TableCell<'a>>,
    /// Whether this is the header row.
    pub header: bool,
    /// Source span.
    pub span: Span,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell<'a> {
    /// Cell content (inline elements).
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Inline-level AST nodes (within paragraphs, headings, table cells).
#[derive(Debug, Clone, PartialEq)]
pub enum Inline<'a> {
    /// Plain text run.
    Text(Text<'a>),
    /// Emphasized text (`*italic*` / `_italic_`).
    Emphasis(Emphasis<'a>),
    /// Strong text (`**bold**` / `__bold__`).
    Strong(Strong<'a>),
    /// Inline code (`` `code` ``).
    CodeSpan(CodeSpan<'a>),
    /// Hyperlink with label and destination.
    Link(Link<'a>),
    /// Image reference (`![alt](src)`).
    Image(Image<'a>),
    /// Hard line break (two trailing spaces before a newline).
    LineBreak(Span),
}

impl Inline<'_> {
    /// Source span of this inline element.
    pub fn span(&self) -> Span {
        match self {
            Inline::Text(t) => t.span,
            Inline::Emphasis(e) => e.span,
            Inline::Strong(s) => s.span,
            Inline::CodeSpan(c) => c.span,
            Inline::Link(l) => l.span,
            Inline::Image(i) => i.span,
            Inline::LineBreak(s) => *s,
        }
    }
}

/// Plain text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    /// The text content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Emphasized (italic) text.
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis<'a> {
    /// Nested inline content.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Strong (bold) text.
#[derive(Debug, Clone, PartialEq)]
pub struct Strong<'a> {
    /// Nested inline content.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Inline code span.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSpan<'a> {
    /// Code content (not parsed for formatting).
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Hyperlink with label and destination.
///
/// The destination has already passed the URL scheme allow-list; an
/// unvalidated target never reaches the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<'a> {
    /// Link text (may contain nested formatting).
    pub label: Vec<Inline<'a>>,
    /// Link destination URL.
    pub url: CowStr<'a>,
    /// Optional title from `[label](url "title")`.
    pub title: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// Image reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<'a> {
    /// Alt text (plain, not inline-parsed).
    pub alt: CowStr<'a>,
    /// Image source URL or path.
    pub src: CowStr<'a>,
    /// Source span.
    pub span: Span,
}
