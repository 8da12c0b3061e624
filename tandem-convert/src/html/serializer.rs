//! HTML serialization (HtmlNode tree → HTML string)
//!
//! Pipeline: HtmlNode → RcDom → HTML string
//!
//! Serialization goes through html5ever so entity escaping and void-element
//! handling follow the HTML spec.

use crate::ast::html::{HtmlNode, PropertyValue};
use crate::error::ConvertError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Serialize a tree (its children; the root wrapper itself has no tag) to an
/// HTML string.
pub fn serialize_html(tree: &HtmlNode) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in tree.children() {
        let handle = to_rcdom_node(child);
        let serializable = SerializableHandle::from(handle);
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            ConvertError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn to_rcdom_node(node: &HtmlNode) -> Handle {
    match node {
        HtmlNode::Element {
            tag,
            properties,
            children,
        } => {
            let attributes = properties
                .iter()
                .filter_map(|(name, value)| {
                    let rendered = match value {
                        PropertyValue::Text(text) => text.clone(),
                        PropertyValue::Tokens(tokens) => tokens.join(" "),
                        PropertyValue::Flag(true) => String::new(),
                        PropertyValue::Flag(false) => return None,
                    };
                    Some(Attribute {
                        name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
                        value: rendered.into(),
                    })
                })
                .collect();
            let element = Rc::new(Node {
                parent: Cell::new(None),
                children: RefCell::new(Vec::new()),
                data: NodeData::Element {
                    name: QualName::new(None, ns!(html), LocalName::from(tag.as_str())),
                    attrs: RefCell::new(attributes),
                    template_contents: Default::default(),
                    mathml_annotation_xml_integration_point: false,
                },
            });
            for child in children {
                element.children.borrow_mut().push(to_rcdom_node(child));
            }
            element
        }
        HtmlNode::Text { value } => Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data: NodeData::Text {
                contents: RefCell::new(value.clone().into()),
            },
        }),
        HtmlNode::Comment { value } => Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data: NodeData::Comment {
                contents: value.clone().into(),
            },
        }),
        // a nested root has no element of its own; emit a transparent span
        // so the shape error stays visible instead of silently vanishing
        HtmlNode::Root { children } => {
            let wrapper = Rc::new(Node {
                parent: Cell::new(None),
                children: RefCell::new(Vec::new()),
                data: NodeData::Element {
                    name: QualName::new(None, ns!(html), LocalName::from("span")),
                    attrs: RefCell::new(Vec::new()),
                    template_contents: Default::default(),
                    mathml_annotation_xml_integration_point: false,
                },
            });
            for child in children {
                wrapper.children.borrow_mut().push(to_rcdom_node(child));
            }
            wrapper
        }
    }
}
