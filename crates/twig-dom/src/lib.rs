//! Document tree for the twig XML reader.
//!
//! This crate provides an arena-based tree holding one XML document: the
//! document node itself, elements with ordered attribute lists, text runs,
//! comments and CDATA sections.
//!
//! # Design
//!
//! Every node lives in a slot of a single arena and is addressed by a
//! [`NodeId`]. Parent, child and sibling relationships are stored as ids, so
//! traversal in any direction is O(1) and removal never leaves a dangling
//! reference: a removed slot bumps its generation and any outstanding id to
//! it stops resolving.
//!
//! Sibling links are derived data. They are rewritten by every structural
//! mutation ([`DomTree::append_child`], [`DomTree::insert_child`],
//! [`DomTree::remove_child`], [`DomTree::remove_child_at`]) and cannot be set
//! directly.

mod error;
mod outline;
mod serialize;

use std::fmt;

use strum_macros::IntoStaticStr;
use tracing::trace;

pub use error::DomError;
pub use outline::tree_outline;

/// A generational handle to a node in a [`DomTree`].
///
/// Ids are only meaningful for the tree that issued them. Once the node is
/// removed the id goes stale and every lookup through it returns `None` (or
/// [`DomError::NotFound`] for mutations), even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The document node is always at index 0 and is never removed.
    pub const DOCUMENT: Self = Self {
        index: 0,
        generation: 0,
    };

    /// Arena slot of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}.{}", self.index, self.generation)
    }
}

/// A name/value pair attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute value, exactly as it appeared between the quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Element-specific data.
///
/// Attributes keep insertion order and duplicate names are allowed; lookups
/// by name return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attributes: Vec<Attribute>,
}

impl ElementData {
    /// Create element data with the given tag name and no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidStructure`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, DomError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomError::InvalidStructure("element name must not be empty"));
        }
        Ok(Self {
            name,
            attributes: Vec::new(),
        })
    }

    /// The element's tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of attributes, duplicates included.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(Attribute::value)
    }

    /// Whether any attribute, whatever its name, has exactly this value.
    #[must_use]
    pub fn has_attribute_value(&self, value: &str) -> bool {
        self.attributes.iter().any(|attr| attr.value == value)
    }

    /// Append an attribute. An existing attribute with the same name is kept.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(name, value));
    }

    /// Remove and return the first attribute called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::AttributeNotFound`] if no attribute has that name.
    pub fn remove_attribute(&mut self, name: &str) -> Result<Attribute, DomError> {
        let position = self
            .attributes
            .iter()
            .position(|attr| attr.name == name)
            .ok_or_else(|| DomError::AttributeNotFound(name.to_string()))?;
        Ok(self.attributes.remove(position))
    }
}

/// The variant of a node together with its payload.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum NodeType {
    /// The document container. Exactly one per tree, at [`NodeId::DOCUMENT`].
    Document,
    /// An element with a name, attributes and children.
    Element(ElementData),
    /// A run of character data. Leaf.
    Text(String),
    /// The body of a `<!-- -->` comment. Leaf.
    Comment(String),
    /// The raw body of a `<![CDATA[ ]]>` section. Leaf.
    CData(String),
}

impl NodeType {
    /// Variant name, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Leaf variants cannot own children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Comment(_) | Self::CData(_))
    }
}

/// One entry of the tree.
///
/// All relationship fields are maintained by [`DomTree`]; a `Node` is only
/// handed out by shared reference.
#[derive(Debug, Clone)]
pub struct Node {
    node_type: NodeType,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    next_sibling: Option<NodeId>,
    prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }

    /// The node's variant and payload.
    #[must_use]
    pub const fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// The parent, or `None` for the document and for detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The child of the same parent immediately after this one.
    #[must_use]
    pub const fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// The child of the same parent immediately before this one.
    #[must_use]
    pub const fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-based XML document with O(1) node access and traversal.
///
/// A tree always contains its document node. The document accepts comments,
/// whitespace-only text and at most one element, the root element.
#[derive(Debug, Clone)]
pub struct DomTree {
    slots: Vec<Slot>,
    /// Slots whose node was removed, reused by the next allocation.
    free: Vec<usize>,
    root_element: Option<NodeId>,
}

impl DomTree {
    /// Create a new tree containing only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::detached(NodeType::Document)),
            }],
            free: Vec::new(),
            root_element: None,
        }
    }

    /// The document node id.
    #[must_use]
    pub const fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// The root element, if one has been set.
    #[must_use]
    pub const fn document_element(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by its id. `None` if the id is stale.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Whether `id` names a live node of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, attached or not, the document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Always `false`: the document node cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a detached node and return its id.
    fn alloc(&mut self, node_type: NodeType) -> Result<NodeId, DomError> {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(Node::detached(node_type));
                return Ok(NodeId {
                    index,
                    generation: slot.generation,
                });
            }
        }

        self.slots
            .try_reserve(1)
            .map_err(|_| DomError::OutOfMemory)?;
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node::detached(node_type)),
        });
        Ok(NodeId {
            index,
            generation: 0,
        })
    }

    /// Create a detached element with no attributes.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidStructure`] for an empty name,
    /// [`DomError::OutOfMemory`] if the arena cannot grow.
    pub fn create_element(&mut self, name: impl Into<String>) -> Result<NodeId, DomError> {
        let data = ElementData::new(name)?;
        self.alloc(NodeType::Element(data))
    }

    /// Create a detached element carrying `attributes` in the given order.
    ///
    /// # Errors
    ///
    /// Same as [`DomTree::create_element`].
    pub fn create_element_with_attributes(
        &mut self,
        name: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Result<NodeId, DomError> {
        let mut data = ElementData::new(name)?;
        data.attributes = attributes;
        self.alloc(NodeType::Element(data))
    }

    /// Create a detached text node.
    ///
    /// # Errors
    ///
    /// [`DomError::OutOfMemory`] if the arena cannot grow.
    pub fn create_text(&mut self, text: impl Into<String>) -> Result<NodeId, DomError> {
        self.alloc(NodeType::Text(text.into()))
    }

    /// Create a detached comment node.
    ///
    /// # Errors
    ///
    /// [`DomError::OutOfMemory`] if the arena cannot grow.
    pub fn create_comment(&mut self, text: impl Into<String>) -> Result<NodeId, DomError> {
        self.alloc(NodeType::Comment(text.into()))
    }

    /// Create a detached CDATA node.
    ///
    /// # Errors
    ///
    /// [`DomError::OutOfMemory`] if the arena cannot grow.
    pub fn create_cdata(&mut self, text: impl Into<String>) -> Result<NodeId, DomError> {
        self.alloc(NodeType::CData(text.into()))
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data, for attribute edits.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Payload of a Text, Comment or CDATA node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) | NodeType::Comment(s) | NodeType::CData(s) => Some(s.as_str()),
            NodeType::Document | NodeType::Element(_) => None,
        })
    }

    /// Replace the payload of a Text, Comment or CDATA node.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if `id` is stale.
    /// - [`DomError::UnsupportedOperation`] for elements and the document.
    /// - [`DomError::InvalidStructure`] if the node is a text child of the
    ///   document and the new payload is not whitespace-only.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        let text = text.into();
        let node = self.node(id)?;
        if matches!(node.node_type, NodeType::Text(_))
            && node.parent == Some(NodeId::DOCUMENT)
            && !is_whitespace_only(&text)
        {
            return Err(DomError::InvalidStructure(
                "text directly under the document must be whitespace",
            ));
        }

        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        match &mut node.node_type {
            NodeType::Text(s) | NodeType::Comment(s) | NodeType::CData(s) => {
                *s = text;
                Ok(())
            }
            other => Err(DomError::UnsupportedOperation {
                operation: "set text",
                kind: other.kind(),
            }),
        }
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// See [`DomTree::insert_child`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let len = self.node(parent)?.children.len();
        self.insert_child(parent, child, len)
    }

    /// Insert `child` before position `index` of `parent`'s children.
    /// `index` may equal the current child count, which appends.
    ///
    /// When `parent` is the document and `child` is an element, the element
    /// becomes the root element.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if either id is stale.
    /// - [`DomError::UnsupportedOperation`] if `parent` is a leaf.
    /// - [`DomError::IndexOutOfRange`] if `index` exceeds the child count.
    /// - [`DomError::InvalidStructure`] if `child` is already attached, is the
    ///   document, contains `parent`, or is rejected by the document rules.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), DomError> {
        self.check_insertion(parent, child, index)?;
        let becomes_root = parent == NodeId::DOCUMENT && self.as_element(child).is_some();

        let parent_node = self.get_mut(parent).ok_or(DomError::NotFound(parent))?;
        parent_node.children.insert(index, child);
        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
        }
        self.relink(parent, index.saturating_sub(1), index + 2);

        if becomes_root {
            self.root_element = Some(child);
        }
        Ok(())
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId, index: usize) -> Result<(), DomError> {
        let parent_node = self.node(parent)?;
        if parent_node.node_type.is_leaf() {
            return Err(DomError::UnsupportedOperation {
                operation: "add a child",
                kind: parent_node.node_type.kind(),
            });
        }

        let len = parent_node.children.len();
        if index > len {
            return Err(DomError::IndexOutOfRange { index, len });
        }

        let child_node = self.node(child)?;
        if child == NodeId::DOCUMENT {
            return Err(DomError::InvalidStructure(
                "the document cannot be a child of another node",
            ));
        }
        if child_node.parent.is_some() {
            return Err(DomError::InvalidStructure("node is already attached"));
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(DomError::InvalidStructure(
                "node cannot be inserted into its own subtree",
            ));
        }

        if parent == NodeId::DOCUMENT {
            self.validate_document_child(&child_node.node_type)?;
        }
        Ok(())
    }

    /// Document-level rules: whitespace-only text, comments, and a single
    /// root element.
    fn validate_document_child(&self, node_type: &NodeType) -> Result<(), DomError> {
        match node_type {
            NodeType::Text(text) if !is_whitespace_only(text) => Err(DomError::InvalidStructure(
                "text directly under the document must be whitespace",
            )),
            NodeType::CData(_) => Err(DomError::InvalidStructure(
                "CDATA cannot be a child of the document",
            )),
            NodeType::Document => Err(DomError::InvalidStructure(
                "a document cannot contain another document",
            )),
            NodeType::Element(_) if self.root_element.is_some() => Err(
                DomError::InvalidStructure("document already has a root element"),
            ),
            _ => Ok(()),
        }
    }

    /// Remove `child` from `parent` and delete it together with its subtree.
    ///
    /// Removing the root element from the document clears the root, so a new
    /// element may be added afterwards.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if `parent` is stale or `child` is not one of
    ///   its direct children.
    /// - [`DomError::UnsupportedOperation`] if `parent` is a leaf.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.container(parent, "remove a child")?;
        let index = parent_node
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(DomError::NotFound(child))?;
        self.remove_at(parent, index)
    }

    /// Remove the child at position `index` of `parent` and delete its subtree.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if `parent` is stale.
    /// - [`DomError::UnsupportedOperation`] if `parent` is a leaf.
    /// - [`DomError::IndexOutOfRange`] if there is no child at `index`.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<(), DomError> {
        let len = self.container(parent, "remove a child")?.children.len();
        if index >= len {
            return Err(DomError::IndexOutOfRange { index, len });
        }
        self.remove_at(parent, index)
    }

    fn container(&self, id: NodeId, operation: &'static str) -> Result<&Node, DomError> {
        let node = self.node(id)?;
        if node.node_type.is_leaf() {
            return Err(DomError::UnsupportedOperation {
                operation,
                kind: node.node_type.kind(),
            });
        }
        Ok(node)
    }

    /// Delete a node that is not attached to any parent, together with its
    /// subtree. Use it for nodes that were created but never inserted, or
    /// whose insertion was rejected.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotFound`] if `id` is stale.
    /// - [`DomError::InvalidStructure`] for the document or an attached node;
    ///   remove those through their parent instead.
    pub fn discard(&mut self, id: NodeId) -> Result<(), DomError> {
        let node = self.node(id)?;
        if id == NodeId::DOCUMENT {
            return Err(DomError::InvalidStructure("the document cannot be discarded"));
        }
        if node.parent.is_some() {
            return Err(DomError::InvalidStructure(
                "attached nodes are removed through their parent",
            ));
        }
        let freed = self.free_subtree(id);
        trace!(node = %id, freed, "discarded detached subtree");
        Ok(())
    }

    /// Detach the child at a position already known to be valid, then free it.
    fn remove_at(&mut self, parent: NodeId, index: usize) -> Result<(), DomError> {
        let parent_node = self.get_mut(parent).ok_or(DomError::NotFound(parent))?;
        let child = parent_node.children.remove(index);
        self.relink(parent, index.saturating_sub(1), index + 1);

        if self.root_element == Some(child) {
            self.root_element = None;
        }
        let freed = self.free_subtree(child);
        trace!(%parent, %child, freed, "removed subtree");
        Ok(())
    }

    /// Rewrite the sibling links of `parent`'s children in `start..end`,
    /// clamped to the current child list.
    fn relink(&mut self, parent: NodeId, start: usize, end: usize) {
        let Some(parent_node) = self.get(parent) else {
            return;
        };
        let children = &parent_node.children;
        let end = end.min(children.len());
        let links: Vec<(NodeId, Option<NodeId>, Option<NodeId>)> = (start..end)
            .filter_map(|i| {
                let id = *children.get(i)?;
                let prev = i.checked_sub(1).and_then(|p| children.get(p).copied());
                let next = children.get(i + 1).copied();
                Some((id, prev, next))
            })
            .collect();

        for (id, prev, next) in links {
            if let Some(node) = self.get_mut(id) {
                node.prev_sibling = prev;
                node.next_sibling = next;
            }
        }
    }

    /// Release `id` and all of its descendants. Returns the number of nodes freed.
    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                stack.extend(node.children);
                freed += 1;
            }
        }
        freed
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent upwards.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and everything below it in pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First element under the root element (the root included, pre-order)
    /// that has an attribute whose value is `value`. The attribute name is not
    /// considered.
    #[must_use]
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        let root = self.root_element?;
        self.descendants(root).find(|&id| {
            self.as_element(id)
                .is_some_and(|element| element.has_attribute_value(value))
        })
    }

    /// Every element under the root element (the root included) named `name`,
    /// in pre-order.
    #[must_use]
    pub fn find_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        let Some(root) = self.root_element else {
            return Vec::new();
        };
        self.descendants(root)
            .filter(|&id| self.as_element(id).is_some_and(|e| e.name == name))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Space, tab, carriage return and newline only. The empty string qualifies.
#[must_use]
pub fn is_whitespace_only(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
