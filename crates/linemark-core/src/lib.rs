//! # Linemark Core
//!
//! A zero-copy Markdown parsing engine built on a line-oriented scanner.
//!
//! Input text is indexed once into a [`LineBlock`], a slice-based view of
//! the document's lines; block and inline parsing then operate on
//! sub-views of that index without copying text. AST nodes borrow from the
//! input and carry byte spans back into it.
//!
//! ## Quick Start
//!
//! ```rust
//! use linemark_core::Parser;
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let mut parser = Parser::new();
//! let doc = parser.parse(input).unwrap();
//!
//! println!("Parsed {} blocks", doc.blocks.len());
//! ```
//!
//! ## Error Recovery
//!
//! Malformed markdown never aborts a parse. Constructs degrade to literal
//! text or extend to the end of the document, and the errors describing
//! each degradation can be collected:
//!
//! ```rust
//! use linemark_core::Parser;
//!
//! let input = "```rust\nfn unterminated() {}";
//! let mut parser = Parser::new();
//! let result = parser.parse_with_recovery(input);
//!
//! // Document is still parsed, errors are collected
//! println!("Blocks: {}, Errors: {}", result.document.blocks.len(), result.errors.len());
//! ```

pub mod ast;
mod block;
pub mod common;
pub mod error;
mod inline;
pub mod line_block;
pub mod parser;
mod result;
pub mod span;
mod trip;

pub use ast::{Block, Document, Inline};
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use line_block::{LineBlock, LineBlockPosition};
pub use parser::{ParseResult, Parser, ParserOptions};
pub use span::Span;
