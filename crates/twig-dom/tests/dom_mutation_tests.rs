//! Tests for tree mutation: append_child, insert_child, remove_child, remove_child_at, discard.

use twig_dom::{DomError, DomTree, NodeId};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(tag).unwrap()
}

/// Helper that builds `<div>` under the document with children named by `tags`.
fn parent_with_children(tree: &mut DomTree, tags: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::DOCUMENT, parent).unwrap();
    let children = tags
        .iter()
        .map(|tag| {
            let id = alloc_element(tree, tag);
            tree.append_child(parent, id).unwrap();
            id
        })
        .collect();
    (parent, children)
}

// ========== append_child ==========

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b", "c"]);
    let (a, b, c) = (kids[0], kids[1], kids[2]);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
}

#[test]
fn test_append_to_detached_element() {
    let mut tree = DomTree::new();
    let outer = alloc_element(&mut tree, "outer");
    let inner = alloc_element(&mut tree, "inner");
    tree.append_child(outer, inner).unwrap();
    tree.append_child(NodeId::DOCUMENT, outer).unwrap();

    assert_eq!(tree.document_element(), Some(outer));
    assert_eq!(tree.parent(inner), Some(outer));
}

#[test]
fn test_append_already_attached_node_rejected() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a"]);
    let other = alloc_element(&mut tree, "other");
    tree.append_child(parent, other).unwrap();

    let err = tree.append_child(other, kids[0]).unwrap_err();
    assert!(matches!(err, DomError::InvalidStructure(_)));
    assert_eq!(tree.parent(kids[0]), Some(parent));
}

#[test]
fn test_append_ancestor_into_descendant_rejected() {
    let mut tree = DomTree::new();
    let outer = alloc_element(&mut tree, "outer");
    let inner = alloc_element(&mut tree, "inner");
    tree.append_child(outer, inner).unwrap();

    assert!(matches!(
        tree.append_child(inner, outer),
        Err(DomError::InvalidStructure(_))
    ));
    assert!(matches!(
        tree.append_child(outer, outer),
        Err(DomError::InvalidStructure(_))
    ));
}

// ========== insert_child ==========

#[test]
fn test_insert_at_front() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["b"]);
    let existing = kids[0];

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_child(parent, new_child, 0).unwrap();

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_in_middle() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "c"]);
    let (a, c) = (kids[0], kids[1]);

    let b = alloc_element(&mut tree, "b");
    tree.insert_child(parent, b, 1).unwrap();

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_at_len_appends() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b"]);

    let c = alloc_element(&mut tree, "c");
    tree.insert_child(parent, c, 2).unwrap();

    assert_eq!(tree.children(parent), &[kids[0], kids[1], c]);
    assert_eq!(tree.next_sibling(kids[1]), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(kids[1]));
}

#[test]
fn test_insert_past_end_rejected() {
    let mut tree = DomTree::new();
    let (parent, _) = parent_with_children(&mut tree, &["a"]);
    let late = alloc_element(&mut tree, "late");

    let err = tree.insert_child(parent, late, 2).unwrap_err();
    assert!(matches!(err, DomError::IndexOutOfRange { index: 2, len: 1 }));
    assert_eq!(tree.parent(late), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["p"]);
    let child = kids[0];

    tree.remove_child(parent, child).unwrap();

    assert_eq!(tree.children(parent).len(), 0);
    assert!(!tree.contains(child));
    assert_eq!(tree.parent(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b", "c"]);
    let (a, b, c) = (kids[0], kids[1], kids[2]);

    tree.remove_child(parent, a).unwrap();

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b", "c"]);
    let (a, b, c) = (kids[0], kids[1], kids[2]);

    tree.remove_child(parent, b).unwrap();

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b", "c"]);
    let (a, b, c) = (kids[0], kids[1], kids[2]);

    tree.remove_child(parent, c).unwrap();

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_deletes_whole_subtree() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a"]);
    let grandchild = alloc_element(&mut tree, "g");
    let text = tree.create_text("deep").unwrap();
    tree.append_child(kids[0], grandchild).unwrap();
    tree.append_child(grandchild, text).unwrap();
    let before = tree.len();

    tree.remove_child(parent, kids[0]).unwrap();

    assert_eq!(tree.len(), before - 3);
    assert!(!tree.contains(grandchild));
    assert!(!tree.contains(text));
}

#[test]
fn test_remove_non_child_not_found() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a"]);
    let stranger = alloc_element(&mut tree, "stranger");

    assert!(matches!(
        tree.remove_child(parent, stranger),
        Err(DomError::NotFound(id)) if id == stranger
    ));
    assert!(matches!(
        tree.remove_child(NodeId::DOCUMENT, kids[0]),
        Err(DomError::NotFound(_))
    ));
    assert!(tree.contains(stranger));
}

#[test]
fn test_stale_handle_is_not_found() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a"]);
    tree.remove_child(parent, kids[0]).unwrap();

    assert!(matches!(
        tree.remove_child(parent, kids[0]),
        Err(DomError::NotFound(_))
    ));
    assert!(matches!(
        tree.append_child(kids[0], parent),
        Err(DomError::NotFound(_))
    ));
}

// ========== remove_child_at ==========

#[test]
fn test_remove_child_at_index() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with_children(&mut tree, &["a", "b", "c"]);

    tree.remove_child_at(parent, 1).unwrap();

    assert_eq!(tree.children(parent), &[kids[0], kids[2]]);
    assert_eq!(tree.next_sibling(kids[0]), Some(kids[2]));
    assert_eq!(tree.prev_sibling(kids[2]), Some(kids[0]));
    assert!(!tree.contains(kids[1]));
}

#[test]
fn test_remove_child_at_out_of_range() {
    let mut tree = DomTree::new();
    let (parent, _) = parent_with_children(&mut tree, &["a", "b"]);

    assert!(matches!(
        tree.remove_child_at(parent, 2),
        Err(DomError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert_eq!(tree.children(parent).len(), 2);
}

// ========== leaves ==========

#[test]
fn test_leaves_reject_child_mutation() {
    let mut tree = DomTree::new();
    let leaves = [
        tree.create_text("t").unwrap(),
        tree.create_comment("c").unwrap(),
        tree.create_cdata("d").unwrap(),
    ];
    let child = alloc_element(&mut tree, "x");

    for leaf in leaves {
        assert!(matches!(
            tree.append_child(leaf, child),
            Err(DomError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            tree.insert_child(leaf, child, 5),
            Err(DomError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            tree.remove_child(leaf, child),
            Err(DomError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            tree.remove_child_at(leaf, 0),
            Err(DomError::UnsupportedOperation { .. })
        ));
    }
}

#[test]
fn test_set_text_on_leaves_and_elements() {
    let mut tree = DomTree::new();
    let comment = tree.create_comment("old").unwrap();
    tree.set_text(comment, "new").unwrap();
    assert_eq!(tree.text(comment), Some("new"));

    let element = alloc_element(&mut tree, "e");
    assert!(matches!(
        tree.set_text(element, "x"),
        Err(DomError::UnsupportedOperation { .. })
    ));
}

// ========== discard ==========

#[test]
fn test_discard_rejected_insertion_frees_slot() {
    let mut tree = DomTree::new();
    let root = alloc_element(&mut tree, "root");
    tree.append_child(NodeId::DOCUMENT, root).unwrap();

    // A second root is refused and stays detached.
    let extra = alloc_element(&mut tree, "extra");
    let inner = tree.create_text("inner").unwrap();
    tree.append_child(extra, inner).unwrap();
    assert!(tree.append_child(NodeId::DOCUMENT, extra).is_err());
    assert_eq!(tree.len(), 4);

    tree.discard(extra).unwrap();
    assert_eq!(tree.len(), 2);
    assert!(!tree.contains(extra));
    assert!(!tree.contains(inner));

    // The freed slot is reused instead of growing the arena.
    let next = alloc_element(&mut tree, "next");
    assert!(next.index() == extra.index() || next.index() == inner.index());
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_discard_attached_node_rejected() {
    let mut tree = DomTree::new();
    let (_, kids) = parent_with_children(&mut tree, &["a"]);
    assert!(matches!(
        tree.discard(kids[0]),
        Err(DomError::InvalidStructure(_))
    ));
    assert!(matches!(
        tree.discard(NodeId::DOCUMENT),
        Err(DomError::InvalidStructure(_))
    ));
    assert!(tree.contains(kids[0]));
}

#[test]
fn test_discard_stale_handle_not_found() {
    let mut tree = DomTree::new();
    let orphan = tree.create_comment("unused").unwrap();
    tree.discard(orphan).unwrap();
    assert!(matches!(tree.discard(orphan), Err(DomError::NotFound(_))));
}
