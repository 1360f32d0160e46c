use crate::span::Span;
use std::fmt;

/// What degraded during parsing.
///
/// Each kind maps to one degrade site in the block parser: an unclosed code
/// fence extends to the end of the document, over-deep nesting flattens to
/// paragraph text, and a ragged table row keeps its cells but disagrees with
/// the separator row's column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A construct opened but never closed (code fence)
    UnclosedDelimiter,
    /// Block nesting exceeded the configured maximum depth
    NestingTooDeep,
    /// A construct parsed, but its shape is off (ragged table row)
    InvalidSyntax,
}

/// A parse error with location information.
///
/// Malformed markdown never aborts a parse; these errors describe where the
/// parser degraded to plain text or extended a construct to the end of the
/// document. The degraded content is still present in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location where the error occurred
    pub span: Option<Span>,
    /// Error categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// A delimiter opened a construct that never closed.
    pub fn unclosed_delimiter(delimiter: &str, span: Option<Span>) -> Self {
        Self {
            message: format!("unclosed {}", delimiter),
            span,
            kind: ParseErrorKind::UnclosedDelimiter,
        }
    }

    /// Block nesting went past the configured maximum.
    pub fn nesting_too_deep(max_depth: usize, span: Option<Span>) -> Self {
        Self {
            message: format!("block nesting exceeds maximum depth {}", max_depth),
            span,
            kind: ParseErrorKind::NestingTooDeep,
        }
    }

    /// A construct's shape is malformed but its content was kept.
    pub fn invalid_syntax(context: &str, span: Option<Span>) -> Self {
        Self {
            message: format!("invalid syntax in {}", context),
            span,
            kind: ParseErrorKind::InvalidSyntax,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// A collection of parse errors encountered during parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create an empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Check if any errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
