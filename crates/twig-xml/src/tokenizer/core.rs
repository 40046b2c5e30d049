use std::str::Chars;

use strum_macros::Display;
use tracing::trace;
use twig_common::warning::warn_once;
use twig_dom::Attribute;

use super::helpers::is_whitespace_char;
use super::token::{Token, TokenKind};
use crate::XmlError;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "--";
const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";
const END_TAG_OPEN: &str = "</";

/// What the tokenizer produced last, which decides what it scans next.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Nothing read yet. Next: a text run (leading whitespace before the first tag).
    BeginOfStream,
    /// After a text run. Next: an end tag, a CDATA section or a start tag.
    AfterText,
    /// After an ordinary start tag. Next: a CDATA section or a text run.
    AfterStartTag,
    /// After `<name/>`. Next: the synthesized `</name>`, without reading input.
    AfterSelfClosingTag {
        /// Name of the self-closing element.
        name: String,
    },
    /// After an end tag. Next: a text run.
    AfterEndTag,
    /// After a comment. Next: CDATA, end tag, start tag or text, by lookahead.
    AfterComment,
    /// After a CDATA section. Same lookahead as [`TokenizerState::AfterComment`].
    AfterCData,
    /// Input exhausted. Every call returns [`Token::EndOfStream`].
    EndOfStream,
}

impl TokenizerState {
    /// The kind of token that led to this state.
    #[must_use]
    pub const fn last_kind(&self) -> TokenKind {
        match self {
            Self::BeginOfStream => TokenKind::BeginOfStream,
            Self::AfterText => TokenKind::Text,
            Self::AfterStartTag | Self::AfterSelfClosingTag { .. } => TokenKind::StartTag,
            Self::AfterEndTag => TokenKind::EndTag,
            Self::AfterComment => TokenKind::Comment,
            Self::AfterCData => TokenKind::CData,
            Self::EndOfStream => TokenKind::EndOfStream,
        }
    }

    fn after(token: &Token) -> Self {
        match token {
            Token::StartTag {
                name,
                self_closing: true,
                ..
            } => Self::AfterSelfClosingTag { name: name.clone() },
            Token::StartTag { .. } => Self::AfterStartTag,
            Token::EndTag { .. } => Self::AfterEndTag,
            Token::Text { .. } => Self::AfterText,
            Token::CData { .. } => Self::AfterCData,
            Token::Comment { .. } => Self::AfterComment,
            Token::EndOfStream => Self::EndOfStream,
        }
    }
}

/// Tokenizer over a character source.
///
/// Call [`XmlTokenizer::next_token`] until it returns [`Token::EndOfStream`],
/// or iterate: the iterator yields `Result<Token, XmlError>` and stops after
/// the end-of-stream token or the first error.
pub struct XmlTokenizer<I: Iterator<Item = char>> {
    pub(super) input: I,
    /// Characters returned to the input, the next one to read at the end.
    pub(super) pushback: Vec<char>,
    /// Characters consumed so far.
    pub(super) offset: usize,
    pub(super) state: TokenizerState,
    /// Set once the iterator has yielded its final item.
    exhausted: bool,
}

impl<'a> From<&'a str> for XmlTokenizer<Chars<'a>> {
    fn from(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> XmlTokenizer<I> {
    /// Create a new tokenizer reading from `input`.
    pub const fn new(input: I) -> Self {
        Self {
            input,
            pushback: Vec::new(),
            offset: 0,
            state: TokenizerState::BeginOfStream,
            exhausted: false,
        }
    }

    /// Current state of the machine.
    #[must_use]
    pub const fn state(&self) -> &TokenizerState {
        &self.state
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Lexical`] for malformed markup. The tokenizer keeps
    /// its state, but the input position after an error is unspecified.
    pub fn next_token(&mut self) -> Result<Token, XmlError> {
        let state = self.state.clone();

        let token = match state {
            TokenizerState::EndOfStream => return Ok(Token::EndOfStream),
            // The synthesized end tag reads no input, so it takes precedence
            // over a comment that may follow the self-closing tag.
            TokenizerState::AfterSelfClosingTag { name } => Token::EndTag { name },
            _ if self.try_match(COMMENT_OPEN) => self.scan_comment()?,
            TokenizerState::BeginOfStream | TokenizerState::AfterEndTag => self.scan_text()?,
            TokenizerState::AfterText => {
                if self.next_chars_are(END_TAG_OPEN) {
                    self.scan_end_tag()?
                } else if self.try_match(CDATA_OPEN) {
                    self.scan_cdata()?
                } else {
                    self.scan_start_tag()?
                }
            }
            TokenizerState::AfterStartTag => {
                if self.try_match(CDATA_OPEN) {
                    self.scan_cdata()?
                } else {
                    self.scan_text()?
                }
            }
            TokenizerState::AfterComment | TokenizerState::AfterCData => {
                if self.try_match(CDATA_OPEN) {
                    self.scan_cdata()?
                } else if self.next_chars_are(END_TAG_OPEN) {
                    self.scan_end_tag()?
                } else if self.peek() == Some('<') {
                    self.scan_start_tag()?
                } else {
                    self.scan_text()?
                }
            }
        };

        trace!(kind = %token.kind(), offset = self.offset, "token");
        self.state = TokenizerState::after(&token);
        Ok(token)
    }

    // =========================================================================
    // Scanners
    // =========================================================================

    /// Characters up to the next `<`. End of input with nothing read is the
    /// end of the stream.
    fn scan_text(&mut self) -> Result<Token, XmlError> {
        let mut data = String::new();
        loop {
            match self.peek() {
                None if data.is_empty() => return Ok(Token::EndOfStream),
                None | Some('<') => break,
                Some(c @ ('>' | '&')) => {
                    return Err(self.lexical_error(format!("invalid character '{c}' in text")));
                }
                Some(c) => {
                    data.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token::Text { data })
    }

    /// `<name attr="value" ...>` or `<name .../>`.
    fn scan_start_tag(&mut self) -> Result<Token, XmlError> {
        match self.read() {
            None => return Ok(Token::EndOfStream),
            Some('<') => {}
            Some(c) => {
                return Err(self.lexical_error(format!(
                    "expected '<' to open a start tag, found '{c}'"
                )));
            }
        }

        let mut name = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(self.lexical_error(format!(
                        "unexpected end of input in start tag <{name}"
                    )));
                }
                Some(c) if is_whitespace_char(c) || c == '>' || c == '/' => break,
                Some(c) if c.is_ascii_alphanumeric() => {
                    name.push(c);
                    self.advance();
                }
                Some(c) => {
                    return Err(self.lexical_error(format!(
                        "invalid character '{c}' in tag name <{name}"
                    )));
                }
            }
        }
        if name.is_empty() {
            return Err(self.lexical_error("missing tag name in start tag"));
        }

        let (attributes, self_closing) = match self.read_skipping_whitespace() {
            Some('>') => (Vec::new(), false),
            Some('/') => {
                if self.read() != Some('>') {
                    return Err(self.lexical_error(format!("expected '>' after '/' in <{name}")));
                }
                (Vec::new(), true)
            }
            Some(c) => {
                self.push_back(c);
                self.scan_attributes(&name)?
            }
            None => {
                return Err(self.lexical_error(format!(
                    "unexpected end of input in start tag <{name}"
                )));
            }
        };

        Ok(Token::StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    /// Attribute list of a start tag, up to and including `>` or `/>`.
    /// Returns the attributes and whether the tag closed itself.
    fn scan_attributes(&mut self, tag: &str) -> Result<(Vec<Attribute>, bool), XmlError> {
        let mut attributes: Vec<Attribute> = Vec::new();

        loop {
            let mut name = match self.read_skipping_whitespace() {
                Some('>') => return Ok((attributes, false)),
                Some('/') => {
                    if self.read() == Some('>') {
                        return Ok((attributes, true));
                    }
                    return Err(self.lexical_error(format!("expected '>' after '/' in <{tag}")));
                }
                Some(c) if c.is_ascii_alphanumeric() => String::from(c),
                Some(c) => {
                    return Err(self.lexical_error(format!(
                        "invalid character '{c}' in attribute name on <{tag}>"
                    )));
                }
                None => {
                    return Err(self.lexical_error(format!(
                        "unexpected end of input in start tag <{tag}"
                    )));
                }
            };
            while let Some(c) = self.peek().filter(char::is_ascii_alphanumeric) {
                name.push(c);
                self.advance();
            }

            if self.read_skipping_whitespace() != Some('=') {
                return Err(self.lexical_error(format!(
                    "expected '=' after attribute '{name}' on <{tag}>"
                )));
            }

            let quote = match self.read_skipping_whitespace() {
                Some(q @ ('"' | '\'')) => q,
                _ => {
                    return Err(self.lexical_error(format!(
                        "expected a quoted value for attribute '{name}' on <{tag}>"
                    )));
                }
            };

            let mut value = String::new();
            loop {
                match self.read() {
                    Some(c) if c == quote => break,
                    Some(c) => value.push(c),
                    None => {
                        return Err(self.lexical_error(format!(
                            "unterminated value for attribute '{name}' on <{tag}>"
                        )));
                    }
                }
            }

            if attributes.iter().any(|attr| attr.name() == name) {
                let _ = warn_once(
                    "XML Tokenizer",
                    &format!("duplicate attribute '{name}' on <{tag}>"),
                );
            }
            attributes.push(Attribute::new(name, value));
        }
    }

    /// `</name>` with optional whitespace before the `>`.
    fn scan_end_tag(&mut self) -> Result<Token, XmlError> {
        match self.read() {
            None => return Ok(Token::EndOfStream),
            Some('<') if self.read() == Some('/') => {}
            Some(_) => return Err(self.lexical_error("malformed end tag")),
        }

        let mut name = String::new();
        loop {
            match self.read() {
                Some('>') => break,
                Some(c) if c.is_ascii_alphanumeric() => name.push(c),
                Some(c) if is_whitespace_char(c) => {
                    if self.read_skipping_whitespace() == Some('>') {
                        break;
                    }
                    return Err(self.lexical_error(format!("end tag </{name}> is not closed")));
                }
                Some(c) => {
                    return Err(self.lexical_error(format!(
                        "invalid character '{c}' in end tag </{name}"
                    )));
                }
                None => {
                    return Err(self.lexical_error(format!(
                        "unexpected end of input in end tag </{name}"
                    )));
                }
            }
        }
        if name.is_empty() {
            return Err(self.lexical_error("missing tag name in end tag"));
        }

        Ok(Token::EndTag { name })
    }

    /// Body of a CDATA section; the opener has been consumed.
    fn scan_cdata(&mut self) -> Result<Token, XmlError> {
        let mut data = String::new();
        loop {
            if self.try_match(CDATA_CLOSE) {
                return Ok(Token::CData { data });
            }
            match self.read() {
                Some(c) => data.push(c),
                None => return Err(self.lexical_error("unterminated CDATA section")),
            }
        }
    }

    /// Body of a comment; the opener has been consumed. `--` may only appear
    /// as part of the closing `-->`.
    fn scan_comment(&mut self) -> Result<Token, XmlError> {
        let mut data = String::new();
        loop {
            if self.try_match(COMMENT_CLOSE) {
                return match self.peek() {
                    Some('>') => {
                        self.advance();
                        Ok(Token::Comment { data })
                    }
                    Some(_) => Err(self.lexical_error("'--' is not allowed inside a comment")),
                    None => Err(self.lexical_error("unterminated comment")),
                };
            }
            match self.read() {
                Some(c) => data.push(c),
                None => return Err(self.lexical_error("unterminated comment")),
            }
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for XmlTokenizer<I> {
    type Item = Result<Token, XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let result = self.next_token();
        self.exhausted = matches!(result, Ok(Token::EndOfStream) | Err(_));
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let tokenizer = XmlTokenizer::from("<a/>");
        assert_eq!(*tokenizer.state(), TokenizerState::BeginOfStream);
        assert_eq!(tokenizer.state().last_kind(), TokenKind::BeginOfStream);
    }

    #[test]
    fn test_self_closing_state_carries_name() {
        let mut tokenizer = XmlTokenizer::from("<leaf/>");
        let _ = tokenizer.next_token().unwrap();
        let _ = tokenizer.next_token().unwrap();
        assert_eq!(
            *tokenizer.state(),
            TokenizerState::AfterSelfClosingTag {
                name: "leaf".to_string()
            }
        );
        assert_eq!(tokenizer.state().last_kind(), TokenKind::StartTag);
        assert_eq!(
            tokenizer.next_token().unwrap(),
            Token::EndTag {
                name: "leaf".to_string()
            }
        );
        assert_eq!(*tokenizer.state(), TokenizerState::AfterEndTag);
    }

    #[test]
    fn test_end_of_stream_is_sticky() {
        let mut tokenizer = XmlTokenizer::from("");
        assert!(tokenizer.next_token().unwrap().is_eos());
        assert!(tokenizer.next_token().unwrap().is_eos());
        assert_eq!(*tokenizer.state(), TokenizerState::EndOfStream);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        // Empty leading text, then the error on the attribute without '='.
        let items: Vec<_> = XmlTokenizer::from("<a b>").collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], Err(XmlError::Lexical { .. })));
    }
}
