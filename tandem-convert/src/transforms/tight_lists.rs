//! Force tight list rendering.
//!
//! The editing surface renders every list visually tight regardless of the
//! source document's loose/tight structure, so the serialized Markdown must
//! not reintroduce blank lines between items.

use crate::ast::markdown::MdNode;

/// Clear the `spread` flag on every list and list item in the tree.
pub fn force_tight(node: &mut MdNode) {
    match node {
        MdNode::List { spread, .. } | MdNode::ListItem { spread, .. } => *spread = false,
        _ => {}
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            force_tight(child);
        }
    }
}
