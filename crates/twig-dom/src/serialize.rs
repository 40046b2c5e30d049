//! Rendering a tree back to markup.
//!
//! Output is written verbatim: attribute values and text are not escaped, so
//! a text payload containing `<`, `>` or `&` produces markup the tokenizer
//! will reject on the way back in. An attribute value is delimited by the
//! quote character it does not contain.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Attribute, DomError, DomTree, NodeId, NodeType};

impl DomTree {
    /// Write the whole document: every top-level child in order.
    ///
    /// # Errors
    ///
    /// [`DomError::MissingRoot`] if no root element is set, [`DomError::Io`]
    /// if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), DomError> {
        self.write_node(NodeId::DOCUMENT, out)
    }

    /// Write the document to a file at `path`, creating or truncating it.
    /// The file is closed before this returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// [`DomError::MissingRoot`] (checked before the file is touched) or
    /// [`DomError::Io`].
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DomError> {
        if self.document_element().is_none() {
            return Err(DomError::MissingRoot);
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Serialize the document into a string.
    ///
    /// # Errors
    ///
    /// [`DomError::MissingRoot`] if no root element is set.
    pub fn to_xml_string(&self) -> Result<String, DomError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write a single node and its subtree.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if `id` is stale.
    /// - [`DomError::MissingRoot`] if `id` is the document and it has no root.
    /// - [`DomError::UnquotableAttribute`] if an attribute value contains both
    ///   quote characters.
    /// - [`DomError::Io`] if the writer fails.
    pub fn write_node<W: Write>(&self, id: NodeId, out: &mut W) -> Result<(), DomError> {
        let node = self.get(id).ok_or(DomError::NotFound(id))?;
        match node.node_type() {
            NodeType::Document => {
                if self.document_element().is_none() {
                    return Err(DomError::MissingRoot);
                }
                for &child in node.children() {
                    self.write_node(child, out)?;
                }
            }
            NodeType::Element(data) => {
                write!(out, "<{}", data.name())?;
                for attr in data.attributes() {
                    let quote = attribute_quote(attr)?;
                    write!(out, " {}={quote}{}{quote}", attr.name(), attr.value())?;
                }
                out.write_all(b">")?;
                for &child in node.children() {
                    self.write_node(child, out)?;
                }
                write!(out, "</{}>", data.name())?;
            }
            NodeType::Text(text) => out.write_all(text.as_bytes())?,
            NodeType::Comment(text) => write!(out, "<!--{text}-->")?,
            NodeType::CData(text) => write!(out, "<![CDATA[{text}]]>")?,
        }
        Ok(())
    }
}

/// Values are written in double quotes, or in single quotes when they
/// contain a double quote.
fn attribute_quote(attr: &Attribute) -> Result<char, DomError> {
    match (attr.value().contains('"'), attr.value().contains('\'')) {
        (false, _) => Ok('"'),
        (true, false) => Ok('\''),
        (true, true) => Err(DomError::UnquotableAttribute(attr.name().to_string())),
    }
}
