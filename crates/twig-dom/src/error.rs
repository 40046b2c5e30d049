//! Errors raised by structural mutation and serialization of a [`DomTree`].
//!
//! [`DomTree`]: crate::DomTree

use std::io;

use thiserror::Error;

use crate::NodeId;

/// Failure of a tree operation.
///
/// Every variant aborts the operation that produced it; the tree is left as it
/// was before the call.
#[derive(Debug, Error)]
pub enum DomError {
    /// A child mutation was attempted on a leaf (Text, Comment or CDATA) node.
    #[error("cannot {operation} on a {kind} node")]
    UnsupportedOperation {
        /// The attempted operation, e.g. `"add a child"`.
        operation: &'static str,
        /// Variant name of the node the operation was attempted on.
        kind: &'static str,
    },

    /// The mutation would break a document-level rule (second root element,
    /// CDATA or non-whitespace text directly under the document, cycles).
    #[error("invalid structure: {0}")]
    InvalidStructure(&'static str),

    /// A child position outside the range the operation accepts.
    #[error("index {index} is out of range for a node with {len} children")]
    IndexOutOfRange {
        /// The rejected position.
        index: usize,
        /// Number of children at the time of the call.
        len: usize,
    },

    /// The handle does not name a live node, or the node is not a direct
    /// child of the node asked to remove it.
    #[error("{0} not found")]
    NotFound(NodeId),

    /// An element has no attribute with the requested name.
    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    /// An attribute value holds both `"` and `'`, so no quoting can delimit it.
    #[error("attribute '{0}' contains both quote characters and cannot be written")]
    UnquotableAttribute(String),

    /// Serialization was attempted on a document without a root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The arena could not grow to hold another node.
    #[error("out of memory while allocating a node")]
    OutOfMemory,

    /// Writing the serialized document failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
