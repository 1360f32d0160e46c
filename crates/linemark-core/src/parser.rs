//! Parser entry point and configuration.

use crate::ast::Document;
use crate::block::BlockParser;
use crate::error::{ParseError, ParseErrors};
use crate::trip::TripChart;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// URL schemes accepted in link and image destinations, compared
    /// case-insensitively. Relative URLs are always accepted.
    pub known_schemes: Vec<String>,
    /// Maximum quote/list nesting depth before content is flattened into a
    /// paragraph.
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            known_schemes: ["http", "https", "ftp", "mailto", "file", "news"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_nesting_depth: 16,
        }
    }
}

/// Result type for parsing that includes recovered errors.
#[derive(Debug)]
pub struct ParseResult<'a> {
    /// The parsed document (may be degraded where errors occurred).
    pub document: Document<'a>,
    /// Errors encountered during parsing.
    pub errors: ParseErrors,
}

impl<'a> ParseResult<'a> {
    /// Check if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Markdown parser with configurable options and error recovery.
///
/// The trip-character dispatch table is built once at construction and
/// shared by every parse, so a parser can be reused across documents.
pub struct Parser {
    options: ParserOptions,
    chart: TripChart,
    /// Errors collected during parsing (for recovery mode).
    errors: ParseErrors,
}

impl Parser {
    /// Create a parser with default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            chart: TripChart::new(),
            errors: ParseErrors::new(),
        }
    }

    /// Parse the input, returning an error if any construct was malformed.
    ///
    /// The document is still fully parsed; malformed constructs degrade as
    /// in recovery mode, but the first recorded error is reported instead
    /// of the document.
    #[inline]
    pub fn parse<'a>(&mut self, input: &'a str) -> Result<Document<'a>, ParseError> {
        let result = self.parse_with_recovery(input);
        let first = result.errors.iter().next().cloned();
        match first {
            None => Ok(result.document),
            Some(first) => Err(first),
        }
    }

    /// Parse with error recovery, returning both document and errors.
    #[inline]
    pub fn parse_with_recovery<'a>(&mut self, input: &'a str) -> ParseResult<'a> {
        self.errors = ParseErrors::new();
        let document =
            BlockParser::new(&self.options, &self.chart, &mut self.errors).parse_document(input);
        ParseResult {
            document,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
