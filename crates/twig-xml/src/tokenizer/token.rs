use std::fmt;

use strum_macros::Display;
use twig_dom::Attribute;

/// The kind of a token, without its payload.
///
/// `BeginOfStream` is never produced; it is the kind the tokenizer reports
/// before its first call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// Nothing has been read yet.
    BeginOfStream,
    /// `<name attr="value">` or `<name/>`.
    StartTag,
    /// `</name>`, or the end tag synthesized after a self-closing start tag.
    EndTag,
    /// A run of characters between markup.
    Text,
    /// `<![CDATA[...]]>`.
    CData,
    /// `<!--...-->`.
    Comment,
    /// Input is exhausted. Produced again on every later call.
    EndOfStream,
}

/// One lexical unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start tag with its attributes in source order. Attribute names are
    /// not required to be unique.
    StartTag {
        /// The tag name.
        name: String,
        /// Attributes in the order they appeared.
        attributes: Vec<Attribute>,
        /// Set for `<name/>`; the next token will be the matching end tag.
        self_closing: bool,
    },

    /// End tag.
    EndTag {
        /// The tag name.
        name: String,
    },

    /// Character data up to the next `<`. May be empty.
    Text {
        /// The raw characters.
        data: String,
    },

    /// Body of a CDATA section, without the delimiters.
    CData {
        /// The raw characters.
        data: String,
    },

    /// Body of a comment, without the delimiters.
    Comment {
        /// The raw characters.
        data: String,
    },

    /// No more input.
    EndOfStream,
}

impl Token {
    /// The token's kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::StartTag { .. } => TokenKind::StartTag,
            Self::EndTag { .. } => TokenKind::EndTag,
            Self::Text { .. } => TokenKind::Text,
            Self::CData { .. } => TokenKind::CData,
            Self::Comment { .. } => TokenKind::Comment,
            Self::EndOfStream => TokenKind::EndOfStream,
        }
    }

    /// Returns true if this is an end-of-stream token.
    #[must_use]
    pub const fn is_eos(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// Tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// Attributes of a start tag; empty for every other kind.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::StartTag { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Number of attributes on a start tag.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes().len()
    }

    /// Name of the attribute at `index`.
    #[must_use]
    pub fn attribute_name(&self, index: usize) -> Option<&str> {
        self.attributes().get(index).map(Attribute::name)
    }

    /// Value of the attribute at `index`.
    #[must_use]
    pub fn attribute_value(&self, index: usize) -> Option<&str> {
        self.attributes().get(index).map(Attribute::value)
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attribute_value_by_name(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name() == name)
            .map(Attribute::value)
    }

    /// Payload of a text, CDATA or comment token.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { data } | Self::CData { data } | Self::Comment { data } => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "StartTag <{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name(), attr.value())?;
                }
                f.write_str(if *self_closing { "/>" } else { ">" })
            }
            Self::EndTag { name } => write!(f, "EndTag </{name}>"),
            Self::Text { data } => write!(f, "Text {data:?}"),
            Self::CData { data } => write!(f, "CData {data:?}"),
            Self::Comment { data } => write!(f, "Comment {data:?}"),
            Self::EndOfStream => f.write_str("EndOfStream"),
        }
    }
}
