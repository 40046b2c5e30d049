//! Helper functions for the XML tokenizer.
//!
//! This module contains the character access primitives the scanners are
//! built on:
//! - `peek` (lookahead without consuming)
//! - `read` (consume one character, optionally skipping whitespace first)
//! - `push_back` (return consumed characters to the front of the input)
//! - `try_match` (speculatively consume a literal, fully unwinding on failure)

use super::core::XmlTokenizer;
use crate::XmlError;

/// Whitespace accepted between markup constructs.
pub(super) const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<I: Iterator<Item = char>> XmlTokenizer<I> {
    /// Look at the next character without consuming it.
    pub(super) fn peek(&mut self) -> Option<char> {
        if let Some(&c) = self.pushback.last() {
            return Some(c);
        }
        let c = self.input.next()?;
        self.pushback.push(c);
        Some(c)
    }

    /// Consume the next character.
    pub(super) fn read(&mut self) -> Option<char> {
        let c = self.pushback.pop().or_else(|| self.input.next())?;
        self.offset += 1;
        Some(c)
    }

    /// Consume the next character, discarding it.
    pub(super) fn advance(&mut self) {
        let _ = self.read();
    }

    /// Skip whitespace, then consume the next character.
    pub(super) fn read_skipping_whitespace(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.read()
    }

    /// Consume whitespace up to the next significant character.
    pub(super) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace_char) {
            self.advance();
        }
    }

    /// Return a consumed character to the front of the input.
    pub(super) fn push_back(&mut self, c: char) {
        self.pushback.push(c);
        self.offset = self.offset.saturating_sub(1);
    }

    /// Return consumed characters to the input so that `chars[0]` is read next.
    pub(super) fn push_back_all(&mut self, chars: &[char]) {
        for &c in chars.iter().rev() {
            self.push_back(c);
        }
    }

    /// Consume `literal` if the input continues with it. Otherwise leave the
    /// input exactly as it was and return false.
    pub(super) fn try_match(&mut self, literal: &str) -> bool {
        let mut expected = literal.chars();
        if self.peek() != expected.clone().next() {
            return false;
        }

        let mut consumed = Vec::with_capacity(literal.len());
        for want in expected {
            match self.read() {
                Some(c) if c == want => consumed.push(c),
                Some(c) => {
                    consumed.push(c);
                    self.push_back_all(&consumed);
                    return false;
                }
                None => {
                    self.push_back_all(&consumed);
                    return false;
                }
            }
        }
        true
    }

    /// Whether the input continues with `literal`. Nothing is consumed.
    pub(super) fn next_chars_are(&mut self, literal: &str) -> bool {
        if self.try_match(literal) {
            let chars: Vec<char> = literal.chars().collect();
            self.push_back_all(&chars);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl<I: Iterator<Item = char>> XmlTokenizer<I> {
    /// Build a lexical error at the current position.
    pub(super) fn lexical_error(&self, message: impl Into<String>) -> XmlError {
        XmlError::Lexical {
            message: message.into(),
            offset: self.offset,
        }
    }
}
