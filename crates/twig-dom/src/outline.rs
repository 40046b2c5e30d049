//! Human-readable dump of a tree, one node per line.

use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// Render the subtree at `id` as an indented outline.
///
/// Text payloads are shown with newlines as `\n` and spaces as `·` so that
/// whitespace-only runs stay visible.
#[must_use]
pub fn tree_outline(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    outline_into(tree, id, 0, &mut out);
    out
}

fn outline_into(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    // Writing into a String cannot fail.
    let _ = match node.node_type() {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::Element(data) => {
            if data.attributes().is_empty() {
                writeln!(out, "{prefix}<{}>", data.name())
            } else {
                let attrs: Vec<String> = data
                    .attributes()
                    .iter()
                    .map(|a| format!("{}=\"{}\"", a.name(), a.value()))
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.name(), attrs.join(" "))
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
        NodeType::CData(data) => writeln!(out, "{prefix}<![CDATA[{data}]]>"),
    };
    for &child in tree.children(id) {
        outline_into(tree, child, indent + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_indents_children() {
        let mut tree = DomTree::new();
        let root = tree.create_element("a").unwrap();
        let text = tree.create_text("hi there").unwrap();
        tree.append_child(NodeId::DOCUMENT, root).unwrap();
        tree.append_child(root, text).unwrap();

        assert_eq!(
            tree_outline(&tree, NodeId::DOCUMENT),
            "Document\n  <a>\n    \"hi\u{00B7}there\"\n"
        );
    }
}
