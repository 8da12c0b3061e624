//! Normalization of fragmented inline marks.
//!
//! The rich-text surface frequently fragments one logical emphasis, strong or
//! strikethrough span into multiple sibling or nested nodes of the same mark
//! type (split around an embedded link, or around a nested strong run). A
//! naive Markdown serializer renders those fragments as broken, escaped or
//! redundant marker sequences. This pass merges the known split shapes back
//! into a single mark and collapses redundant self-nesting.
//!
//! The pass runs to a fixed point and must be idempotent: re-running it over
//! an already-normalized tree produces no further changes.

use crate::ast::markdown::MdNode;

/// The three inline mark kinds subject to normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Emphasis,
    Strong,
    Delete,
}

/// The mark kind of a node, if it is an inline mark.
pub fn mark_kind(node: &MdNode) -> Option<MarkKind> {
    match node {
        MdNode::Emphasis { .. } => Some(MarkKind::Emphasis),
        MdNode::Strong { .. } => Some(MarkKind::Strong),
        MdNode::Delete { .. } => Some(MarkKind::Delete),
        _ => None,
    }
}

pub fn is_inline_mark(node: &MdNode) -> bool {
    mark_kind(node).is_some()
}

fn make_mark(kind: MarkKind, children: Vec<MdNode>) -> MdNode {
    match kind {
        MarkKind::Emphasis => MdNode::Emphasis { children },
        MarkKind::Strong => MdNode::Strong { children },
        MarkKind::Delete => MdNode::Delete { children },
    }
}

/// Collapse a redundant self-nesting one level: a mark whose only child is a
/// mark of the same kind takes over the grandchildren. Non-mark nodes and
/// marks with more than one child pass through unchanged.
pub fn normalize_mark(node: MdNode) -> MdNode {
    let Some(kind) = mark_kind(&node) else {
        return node;
    };
    {
        let children = node.children();
        if children.len() != 1 || mark_kind(&children[0]) != Some(kind) {
            return node;
        }
    }
    let mut node = node;
    let inner = node
        .children_mut()
        .map(std::mem::take)
        .unwrap_or_default()
        .remove(0);
    let grandchildren = match inner {
        MdNode::Emphasis { children }
        | MdNode::Strong { children }
        | MdNode::Delete { children } => children,
        _ => unreachable!("checked same-kind mark above"),
    };
    make_mark(kind, grandchildren)
}

/// Literal text at the end of the last-child chain.
pub fn trailing_text(node: &MdNode) -> Option<&str> {
    if let Some(value) = node.value() {
        return Some(value);
    }
    trailing_text(node.children().last()?)
}

/// Literal text at the start of the first-child chain.
pub fn leading_text(node: &MdNode) -> Option<&str> {
    if let Some(value) = node.value() {
        return Some(value);
    }
    leading_text(node.children().first()?)
}

fn is_boundary_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{00A0}'
}

pub fn has_trailing_whitespace(node: &MdNode) -> bool {
    trailing_text(node)
        .and_then(|text| text.chars().next_back())
        .is_some_and(is_boundary_whitespace)
}

pub fn has_leading_whitespace(node: &MdNode) -> bool {
    leading_text(node)
        .and_then(|text| text.chars().next())
        .is_some_and(is_boundary_whitespace)
}

fn merge_mark_children(kind: MarkKind, left: &MdNode, middle: MdNode, right: &MdNode) -> MdNode {
    let mut children = left.children().to_vec();
    children.push(middle);
    children.extend(right.children().iter().cloned());
    make_mark(kind, children)
}

/// Merge a split-mark island back into a single mark node.
///
/// Two shapes are recognized:
/// 1. mark, link whose only child is the same mark, mark: the link's mark
///    wrapper is unwrapped and the three merge into one mark.
/// 2. emphasis, strong, emphasis where the left fragment ends in whitespace
///    and the right fragment begins with whitespace. This heuristic stays
///    confined to the emphasis/strong pairing; other combinations have not
///    been observed in captured editor output.
///
/// Returns `None` when neither shape matches.
pub fn try_merge_split_island(left: &MdNode, middle: &MdNode, right: &MdNode) -> Option<MdNode> {
    let kind = mark_kind(left)?;
    if mark_kind(right) != Some(kind) {
        return None;
    }

    if let MdNode::Link { url, title, children } = middle {
        if children.len() == 1 && mark_kind(&children[0]) == Some(kind) {
            let unwrapped = MdNode::Link {
                url: url.clone(),
                title: title.clone(),
                children: children[0].children().to_vec(),
            };
            return Some(merge_mark_children(kind, left, unwrapped, right));
        }
    }

    if kind == MarkKind::Emphasis
        && matches!(middle, MdNode::Strong { .. })
        && has_trailing_whitespace(left)
        && has_leading_whitespace(right)
    {
        return Some(merge_mark_children(kind, left, middle.clone(), right));
    }

    None
}

/// Merge split islands in the node's child list until no triple matches.
fn merge_pass(children: &mut Vec<MdNode>) {
    'scan: loop {
        if children.len() < 3 {
            return;
        }
        for i in 0..children.len() - 2 {
            if let Some(merged) =
                try_merge_split_island(&children[i], &children[i + 1], &children[i + 2])
            {
                children.splice(i..i + 3, [merged]);
                continue 'scan;
            }
        }
        return;
    }
}

/// Collapse redundant self-nesting on each child.
fn collapse_pass(children: &mut Vec<MdNode>) {
    for child in children.iter_mut() {
        let taken = std::mem::replace(child, MdNode::ThematicBreak);
        *child = normalize_mark(taken);
    }
}

/// Run the full normalization over a tree, bottom-up, to a fixed point.
pub fn normalize_inline_marks(node: &mut MdNode) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for child in children.iter_mut() {
        normalize_inline_marks(child);
    }
    loop {
        let before = children.clone();
        merge_pass(children);
        collapse_pass(children);
        if *children == before {
            break;
        }
        // merged nodes can expose fresh redundancy one level down
        for child in children.iter_mut() {
            normalize_inline_marks(child);
        }
    }
}
