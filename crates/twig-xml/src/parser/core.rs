use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::Chars;

use tracing::debug;
use twig_dom::{DomTree, NodeId, is_whitespace_only};

use crate::XmlError;
use crate::tokenizer::{Token, XmlTokenizer};

/// Builds a [`DomTree`] from the tokens of one input.
///
/// The builder keeps a single cursor, the innermost open element. Start tags
/// open a child of the cursor (or of the document at top level), end tags
/// must name the cursor and move it to its parent, and leaf tokens attach to
/// the cursor. Self-closing tags need no special case because the tokenizer
/// follows them with a matching end tag.
pub struct XmlParser<I: Iterator<Item = char>> {
    tokenizer: XmlTokenizer<I>,

    /// The tree under construction. `NodeId::DOCUMENT` is the document node.
    tree: DomTree,

    /// Innermost open element, `None` at top level.
    cursor: Option<NodeId>,

    /// Drop text runs made only of whitespace instead of attaching them.
    skip_whitespace_text: bool,
}

impl<'a> From<&'a str> for XmlParser<Chars<'a>> {
    fn from(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> XmlParser<I> {
    /// Create a parser reading characters from `input`.
    pub fn new(input: I) -> Self {
        Self {
            tokenizer: XmlTokenizer::new(input),
            tree: DomTree::new(),
            cursor: None,
            skip_whitespace_text: false,
        }
    }

    /// Discard whitespace-only text instead of keeping it as text nodes.
    /// Indentation and line breaks between tags then leave no trace in the
    /// tree.
    #[must_use]
    pub fn skip_whitespace_text(mut self) -> Self {
        self.skip_whitespace_text = true;
        self
    }

    /// Consume every token and return the finished tree.
    ///
    /// # Errors
    ///
    /// - [`XmlError::Lexical`] from the tokenizer.
    /// - [`XmlError::MismatchedTag`] for an end tag that does not name the
    ///   open element, or input ending with an element still open.
    /// - [`XmlError::InvalidCharacter`] for markup characters in text.
    /// - [`XmlError::Dom`] when the tree rejects a node, e.g. a second root
    ///   element or non-whitespace text outside the root.
    pub fn run(mut self) -> Result<DomTree, XmlError> {
        debug!("building tree");
        loop {
            let token = self.tokenizer.next_token()?;
            if token.is_eos() {
                return self.finish();
            }
            self.process_token(token)?;
        }
    }

    fn process_token(&mut self, token: Token) -> Result<(), XmlError> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => {
                let element = self.tree.create_element_with_attributes(name, attributes)?;
                self.tree.append_child(self.insertion_parent(), element)?;
                debug!(%element, "open element");
                self.cursor = Some(element);
            }
            Token::EndTag { name } => self.close_element(name)?,
            Token::Text { data } => {
                if let Some(character) = data.chars().find(|c| matches!(c, '<' | '>' | '&')) {
                    return Err(XmlError::InvalidCharacter { character });
                }
                if data.is_empty() || (self.skip_whitespace_text && is_whitespace_only(&data)) {
                    return Ok(());
                }
                let text = self.tree.create_text(data)?;
                self.tree.append_child(self.insertion_parent(), text)?;
            }
            Token::CData { data } => {
                let cdata = self.tree.create_cdata(data)?;
                self.tree.append_child(self.insertion_parent(), cdata)?;
            }
            Token::Comment { data } => {
                let comment = self.tree.create_comment(data)?;
                self.tree.append_child(self.insertion_parent(), comment)?;
            }
            Token::EndOfStream => {}
        }
        Ok(())
    }

    fn close_element(&mut self, name: String) -> Result<(), XmlError> {
        let Some(open) = self.cursor else {
            return Err(XmlError::MismatchedTag {
                expected: None,
                found: Some(name),
            });
        };

        let open_name = self.tree.as_element(open).map(|data| data.name().to_string());
        if open_name.as_deref() != Some(name.as_str()) {
            return Err(XmlError::MismatchedTag {
                expected: open_name,
                found: Some(name),
            });
        }

        self.cursor = self
            .tree
            .parent(open)
            .filter(|&parent| parent != NodeId::DOCUMENT);
        debug!(element = %open, "close element");
        Ok(())
    }

    fn finish(self) -> Result<DomTree, XmlError> {
        if let Some(open) = self.cursor {
            return Err(XmlError::MismatchedTag {
                expected: self.tree.as_element(open).map(|data| data.name().to_string()),
                found: None,
            });
        }
        debug!(nodes = self.tree.len(), "finished tree");
        Ok(self.tree)
    }

    fn insertion_parent(&self) -> NodeId {
        self.cursor.unwrap_or(NodeId::DOCUMENT)
    }
}

/// Parse a complete document held in memory.
///
/// # Errors
///
/// See [`XmlParser::run`].
pub fn parse_str(input: &str) -> Result<DomTree, XmlError> {
    XmlParser::from(input).run()
}

/// Read `reader` to the end and parse its contents.
///
/// # Errors
///
/// [`XmlError::Io`] if reading fails or the input is not UTF-8, otherwise
/// see [`XmlParser::run`].
pub fn parse_reader<R: Read>(mut reader: R) -> Result<DomTree, XmlError> {
    let mut input = String::new();
    let _ = reader.read_to_string(&mut input)?;
    parse_str(&input)
}

/// Open the file at `path` and parse it. The file is closed before this
/// returns, on success and on error.
///
/// # Errors
///
/// [`XmlError::Io`] if the file cannot be opened or read, otherwise see
/// [`XmlParser::run`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DomTree, XmlError> {
    let file = File::open(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "parsing file");
    parse_reader(BufReader::new(file))
}
