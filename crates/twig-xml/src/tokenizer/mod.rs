//! XML tokenizer module.
//!
//! The tokenizer produces one [`Token`] per call. Which scanner runs next is
//! decided by the kind of the token produced last, tracked as a
//! [`TokenizerState`].

/// Tokenizer state machine implementation.
pub mod core;
/// Character access primitives with pushback.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{TokenizerState, XmlTokenizer};
pub use token::{Token, TokenKind};
