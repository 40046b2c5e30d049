use std::io;

use thiserror::Error;
use twig_dom::DomError;

/// Failure while tokenizing or building a document.
///
/// Parsing stops at the first error; no partial tree is returned.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed markup: bad tag or attribute syntax, a forbidden character in
    /// a text run, or input ending inside a tag, comment or CDATA section.
    #[error("lexical error at character {offset}: {message}")]
    Lexical {
        /// What the tokenizer expected or found.
        message: String,
        /// Number of characters consumed when the error was detected.
        offset: usize,
    },

    /// An end tag that does not close the innermost open element, or input
    /// ending while an element is still open.
    #[error("{}", describe_mismatch(.expected, .found))]
    MismatchedTag {
        /// Name of the innermost open element, if any.
        expected: Option<String>,
        /// Name on the end tag, or `None` when input ended first.
        found: Option<String>,
    },

    /// Markup-significant character in a text payload handed to the builder.
    #[error("invalid character {character:?} in text")]
    InvalidCharacter {
        /// The offending character.
        character: char,
    },

    /// The tree rejected a node (second root, text outside the root, ...).
    #[error(transparent)]
    Dom(#[from] DomError),

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_mismatch(expected: &Option<String>, found: &Option<String>) -> String {
    match (expected, found) {
        (Some(open), Some(close)) => format!("mismatched tags: </{close}> cannot close <{open}>"),
        (Some(open), None) => format!("element <{open}> is not closed at end of input"),
        (None, Some(close)) => format!("end tag </{close}> has no matching start tag"),
        (None, None) => "mismatched tags".to_string(),
    }
}
