//! HTML parsing (editor HTML → HtmlNode tree)
//!
//! Pipeline: HTML string → html5ever → RcDom → HtmlNode
//!
//! Editor content is a body fragment; html5ever parses it as a full document,
//! so the fragment root is the children of the resulting `<body>`.

use crate::ast::html::{HtmlNode, Properties, PropertyValue};
use crate::error::ConvertError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into the crate-owned tree.
pub fn parse_html_fragment(html: &str) -> Result<HtmlNode, ConvertError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| ConvertError::ParseError(format!("HTML parsing failed: {e}")))?;

    let body = find_body(&dom.document);
    let children = match body {
        Some(body) => convert_children(&body),
        // malformed enough that html5ever produced no body; fall back to
        // whatever top-level nodes exist
        None => convert_children(&dom.document),
    };
    Ok(HtmlNode::Root { children })
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = document
        .children
        .borrow()
        .iter()
        .find(|child| is_element_named(child, "html"))
        .cloned()?;
    let body = html
        .children
        .borrow()
        .iter()
        .find(|child| is_element_named(child, "body"))
        .cloned();
    body
}

fn is_element_named(handle: &Handle, name: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name: qual, .. } if qual.local.as_ref() == name)
}

fn convert_children(handle: &Handle) -> Vec<HtmlNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(to_html_node)
        .collect()
}

/// Narrow an rcdom node into the tree shape; nodes outside the shape
/// (doctype, processing instructions) yield `None`.
fn to_html_node(handle: &Handle) -> Option<HtmlNode> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref().to_string();
            let properties = attrs
                .borrow()
                .iter()
                .map(|attribute| {
                    let key = attribute.name.local.as_ref().to_string();
                    let value = attribute.value.to_string();
                    if key == "class" {
                        let tokens = value.split_whitespace().map(str::to_string).collect();
                        (key, PropertyValue::Tokens(tokens))
                    } else {
                        (key, PropertyValue::Text(value))
                    }
                })
                .collect::<Properties>();
            Some(HtmlNode::Element {
                tag,
                properties,
                children: convert_children(handle),
            })
        }
        NodeData::Text { contents } => Some(HtmlNode::Text {
            value: contents.borrow().to_string(),
        }),
        NodeData::Comment { contents } => Some(HtmlNode::Comment {
            value: contents.to_string(),
        }),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
