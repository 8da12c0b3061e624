//! Markdown parsing (Markdown → MdNode tree)
//!
//! Pipeline: Markdown string → Comrak AST → MdNode

use crate::ast::markdown::{AlignKind, MdNode};
use crate::error::ConvertError;
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse GFM Markdown into the crate-owned tree.
pub fn parse_markdown(source: &str) -> Result<MdNode, ConvertError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);
    match convert_node(root) {
        Some(tree) => Ok(tree),
        None => Err(ConvertError::ParseError(
            "Comrak produced no document root".to_string(),
        )),
    }
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<MdNode> {
    node.children().filter_map(convert_node).collect()
}

fn convert_node<'a>(node: &'a AstNode<'a>) -> Option<MdNode> {
    let value = &node.data.borrow().value;
    let converted = match value {
        NodeValue::Document => MdNode::Root {
            children: convert_children(node),
        },

        NodeValue::Paragraph => MdNode::Paragraph {
            children: convert_children(node),
        },

        NodeValue::Heading(heading) => MdNode::Heading {
            depth: heading.level,
            children: convert_children(node),
        },

        NodeValue::BlockQuote => MdNode::Blockquote {
            children: convert_children(node),
        },

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let spread = !list.tight;
            let mut children = convert_children(node);
            // tightness lives on the list during parsing; items inherit it
            for child in &mut children {
                if let MdNode::ListItem {
                    spread: item_spread,
                    ..
                } = child
                {
                    *item_spread = spread;
                }
            }
            MdNode::List {
                ordered,
                start: ordered.then_some(list.start as u64),
                spread,
                children,
            }
        }

        NodeValue::Item(_) => MdNode::ListItem {
            checked: None,
            spread: false,
            children: convert_children(node),
        },

        NodeValue::TaskItem(symbol) => MdNode::ListItem {
            checked: Some(symbol.is_some()),
            spread: false,
            children: convert_children(node),
        },

        NodeValue::CodeBlock(code_block) => {
            let lang = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            let mut value = code_block.literal.clone();
            if value.ends_with('\n') {
                value.pop();
            }
            MdNode::Code { lang, value }
        }

        NodeValue::HtmlBlock(html) => MdNode::Html {
            value: html.literal.clone(),
        },

        NodeValue::HtmlInline(html) => MdNode::Html {
            value: html.clone(),
        },

        NodeValue::ThematicBreak => MdNode::ThematicBreak,

        NodeValue::Table(table) => MdNode::Table {
            align: table.alignments.iter().map(convert_alignment).collect(),
            children: convert_children(node),
        },

        NodeValue::TableRow(_) => MdNode::TableRow {
            children: convert_children(node),
        },

        NodeValue::TableCell => MdNode::TableCell {
            children: convert_children(node),
        },

        NodeValue::Text(text) => MdNode::Text {
            value: text.clone(),
        },

        NodeValue::Emph => MdNode::Emphasis {
            children: convert_children(node),
        },

        NodeValue::Strong => MdNode::Strong {
            children: convert_children(node),
        },

        NodeValue::Strikethrough => MdNode::Delete {
            children: convert_children(node),
        },

        NodeValue::Code(code) => MdNode::InlineCode {
            value: code.literal.clone(),
        },

        NodeValue::SoftBreak => MdNode::text(" "),

        NodeValue::LineBreak => MdNode::Break,

        NodeValue::Link(link) => MdNode::Link {
            url: link.url.clone(),
            title: if link.title.is_empty() {
                None
            } else {
                Some(link.title.clone())
            },
            children: convert_children(node),
        },

        NodeValue::Image(link) => MdNode::Image {
            url: link.url.clone(),
            alt: collect_text(node),
            title: if link.title.is_empty() {
                None
            } else {
                Some(link.title.clone())
            },
        },

        // unsupported block/inline kinds are dropped
        _ => return None,
    };
    Some(converted)
}

fn convert_alignment(alignment: &TableAlignment) -> AlignKind {
    match alignment {
        TableAlignment::None => AlignKind::None,
        TableAlignment::Left => AlignKind::Left,
        TableAlignment::Center => AlignKind::Center,
        TableAlignment::Right => AlignKind::Right,
    }
}

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_text_into(node, &mut out);
    out
}

fn collect_text_into<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => collect_text_into(child, out),
        }
    }
}
