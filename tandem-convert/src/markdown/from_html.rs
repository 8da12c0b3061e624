//! HTML-tree to Markdown-tree transform (GFM-aware).
//!
//! Accepts the shapes the editor and the Markdown-to-HTML direction produce:
//! headings, paragraphs, emphasis/strong/strikethrough, inline and fenced
//! code, blockquotes, lists (including GFM task items), links, images and
//! tables. Unknown elements are transparent: their children are processed in
//! place. Bare phrasing content in a block position is wrapped in a
//! paragraph.

use crate::ast::html::{HtmlNode, PropertyValue};
use crate::ast::markdown::{AlignKind, MdNode};

/// Transform an HTML-like tree into the Markdown tree.
pub fn html_tree_to_md(root: &HtmlNode) -> MdNode {
    MdNode::Root {
        children: block_children(root.children()),
    }
}

const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "blockquote", "pre", "table",
    "thead", "tbody", "tr", "hr", "div", "section", "article", "figure",
];

fn is_block_element(node: &HtmlNode) -> bool {
    node.tag().is_some_and(|tag| BLOCK_TAGS.contains(&tag))
}

fn contains_block_element(node: &HtmlNode) -> bool {
    node.children()
        .iter()
        .any(|child| is_block_element(child) || contains_block_element(child))
}

fn flush_run(run: &mut Vec<HtmlNode>, out: &mut Vec<MdNode>) {
    if run.is_empty() {
        return;
    }
    let mut children = phrasing_children(run);
    run.clear();
    trim_paragraph_edges(&mut children);
    if !children.is_empty() {
        out.push(MdNode::Paragraph { children });
    }
}

/// Convert nodes appearing in a block context. Runs of phrasing content are
/// collected into paragraphs; whitespace-only text between blocks is
/// dropped.
fn block_children(nodes: &[HtmlNode]) -> Vec<MdNode> {
    let mut out = Vec::new();
    let mut run: Vec<HtmlNode> = Vec::new();

    for node in nodes {
        match node {
            HtmlNode::Text { .. } => {
                if node.is_blank_text() {
                    // whitespace between blocks carries no content; inside a
                    // phrasing run it still separates words
                    if !run.is_empty() {
                        run.push(node.clone());
                    }
                } else {
                    run.push(node.clone());
                }
            }
            HtmlNode::Comment { .. } => {}
            HtmlNode::Element { tag, .. } if BLOCK_TAGS.contains(&tag.as_str()) => {
                flush_run(&mut run, &mut out);
                convert_block(node, &mut out);
            }
            HtmlNode::Element { .. } => {
                if contains_block_element(node) {
                    flush_run(&mut run, &mut out);
                    out.extend(block_children(node.children()));
                } else {
                    run.push(node.clone());
                }
            }
            HtmlNode::Root { .. } => {
                flush_run(&mut run, &mut out);
                out.extend(block_children(node.children()));
            }
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn trim_paragraph_edges(children: &mut Vec<MdNode>) {
    if let Some(MdNode::Text { value }) = children.first_mut() {
        *value = value.trim_start().to_string();
        if value.is_empty() {
            children.remove(0);
        }
    }
    if let Some(MdNode::Text { value }) = children.last_mut() {
        *value = value.trim_end().to_string();
        if value.is_empty() {
            children.pop();
        }
    }
}

fn convert_block(node: &HtmlNode, out: &mut Vec<MdNode>) {
    let Some(tag) = node.tag() else { return };
    match tag {
        "p" => {
            let mut children = phrasing_children(node.children());
            trim_paragraph_edges(&mut children);
            if !children.is_empty() {
                out.push(MdNode::Paragraph { children });
            }
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let depth = tag.as_bytes()[1] - b'0';
            let mut children = phrasing_children(node.children());
            trim_paragraph_edges(&mut children);
            out.push(MdNode::Heading { depth, children });
        }
        "blockquote" => out.push(MdNode::Blockquote {
            children: block_children(node.children()),
        }),
        "pre" => out.push(convert_pre(node)),
        "hr" => out.push(MdNode::ThematicBreak),
        "ul" | "ol" => out.push(convert_list(node, tag == "ol")),
        "table" => out.push(convert_table(node)),
        // structural wrappers are transparent
        "div" | "section" | "article" | "figure" | "thead" | "tbody" | "tr" => {
            out.extend(block_children(node.children()));
        }
        // a stray list item outside a list keeps its content
        "li" => out.extend(block_children(node.children())),
        _ => out.extend(block_children(node.children())),
    }
}

fn convert_pre(node: &HtmlNode) -> MdNode {
    let code = node
        .children()
        .iter()
        .find(|child| child.is_element("code"));
    let (lang, source) = match code {
        Some(code) => (
            code.properties()
                .class_list()
                .iter()
                .find_map(|token| token.strip_prefix("language-"))
                .map(str::to_string),
            code.text_content(),
        ),
        None => (None, node.text_content()),
    };
    let mut value = source;
    if value.ends_with('\n') {
        value.pop();
    }
    MdNode::Code { lang, value }
}

fn convert_list(node: &HtmlNode, ordered: bool) -> MdNode {
    let start = if ordered {
        Some(
            node.properties()
                .get("start")
                .and_then(PropertyValue::as_text)
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1),
        )
    } else {
        None
    };

    let mut items = Vec::new();
    for child in node.children() {
        if child.is_element("li") {
            items.push(convert_list_item(child));
        }
    }
    let spread = items
        .iter()
        .any(|item| matches!(item, MdNode::ListItem { spread: true, .. }));
    MdNode::List {
        ordered,
        start,
        spread,
        children: items,
    }
}

fn convert_list_item(item: &HtmlNode) -> MdNode {
    let mut nodes: Vec<HtmlNode> = item.children().to_vec();
    let mut checked = None;

    let is_task_class = item.properties().has_class("task-list-item");
    if let Some(index) = nodes.iter().position(is_checkbox) {
        let leading_only = nodes[..index].iter().all(HtmlNode::is_blank_text);
        if leading_only {
            checked = Some(
                nodes[index]
                    .properties()
                    .get("checked")
                    .is_some_and(PropertyValue::is_set),
            );
            nodes.drain(..=index);
            if let Some(HtmlNode::Text { value }) = nodes.first_mut() {
                if let Some(stripped) = value.strip_prefix(' ') {
                    *value = stripped.to_string();
                }
                if value.is_empty() {
                    nodes.remove(0);
                }
            }
        }
    }
    if checked.is_none() && is_task_class {
        checked = Some(false);
    }

    let explicit_paragraphs = nodes.iter().filter(|n| n.is_element("p")).count();
    let children = block_children(&nodes);
    let spread = explicit_paragraphs > 0 && children.len() > 1;

    MdNode::ListItem {
        checked,
        spread,
        children,
    }
}

fn is_checkbox(node: &HtmlNode) -> bool {
    node.is_element("input")
        && node
            .properties()
            .get("type")
            .and_then(PropertyValue::as_text)
            == Some("checkbox")
}

fn convert_table(node: &HtmlNode) -> MdNode {
    let mut rows = Vec::new();
    collect_rows(node, &mut rows);

    let align = rows
        .first()
        .map(|row: &HtmlNode| {
            row.children()
                .iter()
                .filter(|cell| cell.is_element("th") || cell.is_element("td"))
                .map(cell_alignment)
                .collect()
        })
        .unwrap_or_default();

    let children = rows
        .iter()
        .map(|row| MdNode::TableRow {
            children: row
                .children()
                .iter()
                .filter(|cell| cell.is_element("th") || cell.is_element("td"))
                .map(convert_cell)
                .collect(),
        })
        .collect();

    MdNode::Table { align, children }
}

fn collect_rows(node: &HtmlNode, rows: &mut Vec<HtmlNode>) {
    for child in node.children() {
        if child.is_element("tr") {
            rows.push(child.clone());
        } else if child.is_element("thead") || child.is_element("tbody") {
            collect_rows(child, rows);
        }
    }
}

fn cell_alignment(cell: &HtmlNode) -> AlignKind {
    let from_attr = cell
        .properties()
        .get("align")
        .and_then(PropertyValue::as_text)
        .map(str::to_string);
    let from_style = cell
        .properties()
        .get("style")
        .and_then(PropertyValue::as_text)
        .and_then(|style| {
            style
                .split(';')
                .find_map(|rule| rule.trim().strip_prefix("text-align:"))
                .map(|value| value.trim().to_string())
        });
    match from_attr.or(from_style).as_deref() {
        Some("left") => AlignKind::Left,
        Some("center") => AlignKind::Center,
        Some("right") => AlignKind::Right,
        _ => AlignKind::None,
    }
}

/// Table cells hold phrasing content; paragraph wrappers (the editor wraps
/// every cell's content in `<p>`) are unwrapped, multiple paragraphs join
/// with a space.
fn convert_cell(cell: &HtmlNode) -> MdNode {
    let mut flattened: Vec<HtmlNode> = Vec::new();
    for child in cell.children() {
        if child.is_element("p") || child.is_element("div") {
            if !flattened.is_empty() {
                flattened.push(HtmlNode::text(" "));
            }
            flattened.extend(child.children().iter().cloned());
        } else if !child.is_blank_text() {
            flattened.push(child.clone());
        }
    }
    let mut children = phrasing_children(&flattened);
    trim_paragraph_edges(&mut children);
    MdNode::TableCell { children }
}

fn phrasing_children(nodes: &[HtmlNode]) -> Vec<MdNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            HtmlNode::Text { value } => out.push(MdNode::Text {
                value: value.clone(),
            }),
            HtmlNode::Comment { .. } => {}
            HtmlNode::Root { .. } => out.extend(phrasing_children(node.children())),
            HtmlNode::Element { tag, .. } => match tag.as_str() {
                "em" | "i" => out.push(MdNode::Emphasis {
                    children: phrasing_children(node.children()),
                }),
                "strong" | "b" => out.push(MdNode::Strong {
                    children: phrasing_children(node.children()),
                }),
                "del" | "s" | "strike" => out.push(MdNode::Delete {
                    children: phrasing_children(node.children()),
                }),
                "code" => out.push(MdNode::InlineCode {
                    value: node.text_content(),
                }),
                "br" => out.push(MdNode::Break),
                "a" => {
                    let properties = node.properties();
                    out.push(MdNode::Link {
                        url: properties
                            .get("href")
                            .and_then(PropertyValue::as_text)
                            .unwrap_or_default()
                            .to_string(),
                        title: properties
                            .get("title")
                            .and_then(PropertyValue::as_text)
                            .map(str::to_string),
                        children: phrasing_children(node.children()),
                    });
                }
                "img" => {
                    let properties = node.properties();
                    out.push(MdNode::Image {
                        url: properties
                            .get("src")
                            .and_then(PropertyValue::as_text)
                            .unwrap_or_default()
                            .to_string(),
                        alt: properties
                            .get("alt")
                            .and_then(PropertyValue::as_text)
                            .unwrap_or_default()
                            .to_string(),
                        title: properties
                            .get("title")
                            .and_then(PropertyValue::as_text)
                            .map(str::to_string),
                    });
                }
                "input" => {}
                // anything else is transparent phrasing
                _ => out.extend(phrasing_children(node.children())),
            },
        }
    }
    out
}
