//! HTML-like tree: elements with tag name, ordered attributes and ordered
//! children, plus text and comment leaves.
//!
//! Attribute names are the literal HTML names (`class`, `href`, `data-type`).
//! The `class` attribute is kept as an ordered token list so rewrite passes can
//! test and replace individual class tokens without string splitting.

/// Value of a single HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Ordinary string-valued attribute.
    Text(String),
    /// Ordered token list (the `class` attribute).
    Tokens(Vec<String>),
    /// Boolean attribute (`checked`, `disabled`); `Flag(false)` serializes to
    /// nothing.
    Flag(bool),
}

impl PropertyValue {
    /// The attribute value as a plain string, if it is string-valued.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Whether a boolean attribute is set. String values count as set because
    /// HTML treats any present boolean attribute as true (`checked="checked"`).
    pub fn is_set(&self) -> bool {
        match self {
            PropertyValue::Flag(set) => *set,
            PropertyValue::Text(_) | PropertyValue::Tokens(_) => true,
        }
    }
}

/// Ordered attribute map of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, PropertyValue)>);

impl Properties {
    pub fn new() -> Self {
        Properties(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Insert or replace an attribute, preserving its position when replacing.
    pub fn set(&mut self, name: &str, value: PropertyValue) {
        if let Some(entry) = self.0.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value;
        } else {
            self.0.push((name.to_string(), value));
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The ordered class token list; empty when no `class` attribute exists.
    pub fn class_list(&self) -> &[String] {
        match self.get("class") {
            Some(PropertyValue::Tokens(tokens)) => tokens,
            _ => &[],
        }
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_list().iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, PropertyValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Properties(iter.into_iter().collect())
    }
}

/// A node of the HTML-like tree.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Root {
        children: Vec<HtmlNode>,
    },
    Element {
        tag: String,
        properties: Properties,
        children: Vec<HtmlNode>,
    },
    Text {
        value: String,
    },
    Comment {
        value: String,
    },
}

impl HtmlNode {
    pub fn element(tag: &str, properties: Properties, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Element {
            tag: tag.to_string(),
            properties,
            children,
        }
    }

    pub fn text(value: &str) -> HtmlNode {
        HtmlNode::Text {
            value: value.to_string(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, name: &str) -> bool {
        self.tag() == Some(name)
    }

    /// True iff the node is an element denoting an image.
    pub fn is_image_node(&self) -> bool {
        self.is_element("img")
    }

    /// Element attributes; empty for non-element nodes, never absent.
    pub fn properties(&self) -> &Properties {
        static EMPTY: Properties = Properties(Vec::new());
        match self {
            HtmlNode::Element { properties, .. } => properties,
            _ => &EMPTY,
        }
    }

    pub fn properties_mut(&mut self) -> Option<&mut Properties> {
        match self {
            HtmlNode::Element { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Ordered children; empty for leaf nodes, never absent.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Root { children } | HtmlNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<HtmlNode>> {
        match self {
            HtmlNode::Root { children } | HtmlNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Text content of the subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text { value } => out.push_str(value),
            HtmlNode::Root { children } | HtmlNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            HtmlNode::Comment { .. } => {}
        }
    }

    /// True for text nodes containing only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, HtmlNode::Text { value } if value.chars().all(char::is_whitespace))
    }
}
