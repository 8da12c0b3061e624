//! Restoration of editor link attributes.
//!
//! The editing surface stores link targets under `data-href` so that clicking
//! a link inside the editor does not also trigger native navigation. Before
//! any HTML-to-Markdown conversion the real `href` must be restored, or
//! converted links lose their targets.

use crate::ast::html::{HtmlNode, PropertyValue};

/// Copy `data-href` back over `href` on every anchor element, removing the
/// backup attribute.
pub fn restore_editor_links(node: &mut HtmlNode) {
    if let HtmlNode::Element { tag, properties, .. } = node {
        if tag == "a" {
            let backed_up = properties
                .get("data-href")
                .and_then(PropertyValue::as_text)
                .map(str::to_string);
            if let Some(href) = backed_up {
                properties.set("href", PropertyValue::Text(href));
                properties.remove("data-href");
            }
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            restore_editor_links(child);
        }
    }
}
