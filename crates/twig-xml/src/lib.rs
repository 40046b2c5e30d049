//! XML tokenizer and tree builder for twig.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([`XmlTokenizer`])
//!   - A state machine keyed on the kind of the previously produced token
//!   - Start tags with quoted attributes, self-closing tags, end tags
//!   - Text runs, comments and CDATA sections
//!
//! - **Tree builder** ([`XmlParser`])
//!   - Folds the token stream into a [`twig_dom::DomTree`]
//!   - Tag balance checking against the currently open element
//!
//! # Not Implemented
//!
//! - Namespaces, DTDs and schema validation
//! - Entity and character references (`&` is rejected in text)
//! - Processing instructions and the XML declaration
//! - Incremental (event-based) parsing

/// Errors produced while reading markup.
pub mod error;
/// Tree construction from a token stream.
pub mod parser;
/// Tokenizer converting characters into tokens.
pub mod tokenizer;

pub use error::XmlError;
pub use parser::{XmlParser, parse_file, parse_reader, parse_str};
pub use tokenizer::{Token, TokenKind, TokenizerState, XmlTokenizer};
