//! Markdown-tree to HTML-tree transform (GFM HTML shapes).
//!
//! Output follows the standard GFM HTML rendering: task items become
//! `class="task-list-item"` entries with a disabled checkbox, tables split
//! into thead/tbody, tight list items inline their paragraph content. Block
//! containers carry newline text nodes between children so the serialized
//! HTML stays line-structured.

use crate::ast::html::{HtmlNode, Properties, PropertyValue};
use crate::ast::markdown::{AlignKind, MdNode};

/// Transform a Markdown tree into the HTML-like tree.
pub fn md_to_html_tree(root: &MdNode) -> HtmlNode {
    let mut children = Vec::new();
    for block in root.children() {
        if let Some(html) = block_to_html(block) {
            if !children.is_empty() {
                children.push(HtmlNode::text("\n"));
            }
            children.push(html);
        }
    }
    HtmlNode::Root { children }
}

/// Wrap block children with newline separators: one after the opening tag,
/// one after every child.
fn wrapped_blocks(blocks: Vec<HtmlNode>) -> Vec<HtmlNode> {
    let mut out = Vec::with_capacity(blocks.len() * 2 + 1);
    out.push(HtmlNode::text("\n"));
    for block in blocks {
        out.push(block);
        out.push(HtmlNode::text("\n"));
    }
    out
}

fn block_to_html(node: &MdNode) -> Option<HtmlNode> {
    match node {
        MdNode::Paragraph { children } => Some(HtmlNode::element(
            "p",
            Properties::new(),
            phrasing_to_html(children),
        )),
        MdNode::Heading { depth, children } => {
            let tag = format!("h{}", (*depth).clamp(1, 6));
            Some(HtmlNode::Element {
                tag,
                properties: Properties::new(),
                children: phrasing_to_html(children),
            })
        }
        MdNode::Blockquote { children } => {
            let blocks = children.iter().filter_map(block_to_html).collect();
            Some(HtmlNode::element(
                "blockquote",
                Properties::new(),
                wrapped_blocks(blocks),
            ))
        }
        MdNode::Code { lang, value } => {
            let mut code_properties = Properties::new();
            if let Some(lang) = lang {
                code_properties.set(
                    "class",
                    PropertyValue::Tokens(vec![format!("language-{lang}")]),
                );
            }
            let mut text = value.clone();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            let code = HtmlNode::element(
                "code",
                code_properties,
                vec![HtmlNode::Text { value: text }],
            );
            Some(HtmlNode::element("pre", Properties::new(), vec![code]))
        }
        MdNode::ThematicBreak => Some(HtmlNode::element("hr", Properties::new(), vec![])),
        MdNode::List {
            ordered,
            start,
            children,
            ..
        } => Some(list_to_html(*ordered, *start, children)),
        MdNode::Table { align, children } => Some(table_to_html(align, children)),
        // raw HTML blocks cannot be represented in the editor tree
        MdNode::Html { .. } => None,
        // phrasing content at block level gets a paragraph wrapper
        other => Some(HtmlNode::element(
            "p",
            Properties::new(),
            phrasing_to_html(std::slice::from_ref(other)),
        )),
    }
}

fn list_to_html(ordered: bool, start: Option<u64>, items: &[MdNode]) -> HtmlNode {
    let is_task_list = items
        .iter()
        .any(|item| matches!(item, MdNode::ListItem { checked: Some(_), .. }));

    let mut properties = Properties::new();
    if ordered {
        if let Some(start) = start {
            if start != 1 {
                properties.set("start", PropertyValue::Text(start.to_string()));
            }
        }
    }
    if is_task_list {
        properties.set(
            "class",
            PropertyValue::Tokens(vec!["contains-task-list".to_string()]),
        );
    }

    let rendered: Vec<HtmlNode> = items.iter().map(item_to_html).collect();
    HtmlNode::element(
        if ordered { "ol" } else { "ul" },
        properties,
        wrapped_blocks(rendered),
    )
}

fn item_to_html(item: &MdNode) -> HtmlNode {
    let MdNode::ListItem {
        checked,
        spread,
        children,
    } = item
    else {
        return HtmlNode::element("li", Properties::new(), vec![]);
    };

    let mut properties = Properties::new();
    let mut content: Vec<HtmlNode> = Vec::new();

    if let Some(checked) = checked {
        properties.set(
            "class",
            PropertyValue::Tokens(vec!["task-list-item".to_string()]),
        );
        let mut checkbox_properties = Properties::new();
        checkbox_properties.set("type", PropertyValue::Text("checkbox".to_string()));
        if *checked {
            checkbox_properties.set("checked", PropertyValue::Flag(true));
        }
        checkbox_properties.set("disabled", PropertyValue::Flag(true));
        content.push(HtmlNode::element("input", checkbox_properties, vec![]));
        content.push(HtmlNode::text(" "));
    }

    if *spread {
        let blocks = children.iter().filter_map(block_to_html).collect();
        content.extend(wrapped_blocks(blocks));
    } else {
        // tight item: paragraph content is inlined, nested blocks go on
        // their own lines
        let mut emitted_block = false;
        for child in children {
            match child {
                MdNode::Paragraph {
                    children: phrasing, ..
                } => content.extend(phrasing_to_html(phrasing)),
                other => {
                    if let Some(html) = block_to_html(other) {
                        content.push(HtmlNode::text("\n"));
                        content.push(html);
                        emitted_block = true;
                    }
                }
            }
        }
        if emitted_block {
            content.push(HtmlNode::text("\n"));
        }
    }

    HtmlNode::element("li", properties, content)
}

fn table_to_html(align: &[AlignKind], rows: &[MdNode]) -> HtmlNode {
    let mut head_rows = Vec::new();
    let mut body_rows = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let rendered = row_to_html(row, index == 0, align);
        if index == 0 {
            head_rows.push(rendered);
        } else {
            body_rows.push(rendered);
        }
    }

    let mut children = vec![HtmlNode::element(
        "thead",
        Properties::new(),
        wrapped_blocks(head_rows),
    )];
    if !body_rows.is_empty() {
        children.push(HtmlNode::element(
            "tbody",
            Properties::new(),
            wrapped_blocks(body_rows),
        ));
    }
    HtmlNode::element("table", Properties::new(), wrapped_blocks(children))
}

fn row_to_html(row: &MdNode, header: bool, align: &[AlignKind]) -> HtmlNode {
    let cells: Vec<HtmlNode> = row
        .children()
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            let mut properties = Properties::new();
            if let Some(value) = align.get(column).and_then(align_attr) {
                properties.set("align", PropertyValue::Text(value.to_string()));
            }
            HtmlNode::element(
                if header { "th" } else { "td" },
                properties,
                phrasing_to_html(cell.children()),
            )
        })
        .collect();
    HtmlNode::element("tr", Properties::new(), wrapped_blocks(cells))
}

fn align_attr(align: &AlignKind) -> Option<&'static str> {
    match align {
        AlignKind::None => None,
        AlignKind::Left => Some("left"),
        AlignKind::Center => Some("center"),
        AlignKind::Right => Some("right"),
    }
}

fn phrasing_to_html(nodes: &[MdNode]) -> Vec<HtmlNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            MdNode::Text { value } => out.push(HtmlNode::Text {
                value: value.clone(),
            }),
            MdNode::Emphasis { children } => out.push(HtmlNode::element(
                "em",
                Properties::new(),
                phrasing_to_html(children),
            )),
            MdNode::Strong { children } => out.push(HtmlNode::element(
                "strong",
                Properties::new(),
                phrasing_to_html(children),
            )),
            MdNode::Delete { children } => out.push(HtmlNode::element(
                "del",
                Properties::new(),
                phrasing_to_html(children),
            )),
            MdNode::InlineCode { value } => out.push(HtmlNode::element(
                "code",
                Properties::new(),
                vec![HtmlNode::Text {
                    value: value.clone(),
                }],
            )),
            MdNode::Break => out.push(HtmlNode::element("br", Properties::new(), vec![])),
            MdNode::Link {
                url,
                title,
                children,
            } => {
                let mut properties = Properties::new();
                properties.set("href", PropertyValue::Text(url.clone()));
                if let Some(title) = title {
                    properties.set("title", PropertyValue::Text(title.clone()));
                }
                out.push(HtmlNode::element(
                    "a",
                    properties,
                    phrasing_to_html(children),
                ));
            }
            MdNode::Image { url, alt, title } => {
                let mut properties = Properties::new();
                properties.set("src", PropertyValue::Text(url.clone()));
                properties.set("alt", PropertyValue::Text(alt.clone()));
                if let Some(title) = title {
                    properties.set("title", PropertyValue::Text(title.clone()));
                }
                out.push(HtmlNode::element("img", properties, vec![]));
            }
            // raw inline HTML cannot be represented in the editor tree
            MdNode::Html { .. } => {}
            // nested block content in a phrasing position: flatten
            other => out.extend(phrasing_to_html(other.children())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> MdNode {
        MdNode::Paragraph {
            children: vec![MdNode::text(text)],
        }
    }

    #[test]
    fn blocks_are_separated_by_newlines() {
        let root = MdNode::Root {
            children: vec![
                MdNode::Heading {
                    depth: 1,
                    children: vec![MdNode::text("Hi")],
                },
                paragraph("body"),
            ],
        };
        let tree = md_to_html_tree(&root);
        let children = tree.children();
        assert!(children[0].is_element("h1"));
        assert_eq!(children[1], HtmlNode::text("\n"));
        assert!(children[2].is_element("p"));
    }

    #[test]
    fn task_items_render_gfm_shape() {
        let root = MdNode::Root {
            children: vec![MdNode::List {
                ordered: false,
                start: None,
                spread: false,
                children: vec![MdNode::ListItem {
                    checked: Some(true),
                    spread: false,
                    children: vec![paragraph("done")],
                }],
            }],
        };
        let tree = md_to_html_tree(&root);
        let list = &tree.children()[0];
        assert!(list.properties().has_class("contains-task-list"));
        let item = list
            .children()
            .iter()
            .find(|c| c.is_element("li"))
            .unwrap();
        assert!(item.properties().has_class("task-list-item"));
        let first = &item.children()[0];
        assert!(first.is_element("input"));
        assert!(first.properties().get("checked").unwrap().is_set());
        assert_eq!(item.children()[1], HtmlNode::text(" "));
        assert_eq!(item.children()[2], HtmlNode::text("done"));
    }

    #[test]
    fn ordered_list_start_attribute_only_when_not_one() {
        let make = |start| MdNode::Root {
            children: vec![MdNode::List {
                ordered: true,
                start,
                spread: false,
                children: vec![MdNode::ListItem {
                    checked: None,
                    spread: false,
                    children: vec![paragraph("a")],
                }],
            }],
        };
        let from_one = md_to_html_tree(&make(Some(1)));
        assert!(!from_one.children()[0].properties().contains("start"));
        let from_three = md_to_html_tree(&make(Some(3)));
        assert_eq!(
            from_three.children()[0]
                .properties()
                .get("start")
                .and_then(PropertyValue::as_text),
            Some("3")
        );
    }
}
