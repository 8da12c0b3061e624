//! Task-list dialect translation.
//!
//! Standard GFM HTML and the editor dialect disagree on task-list shape:
//!
//!   GFM:     <ul class="contains-task-list">
//!              <li class="task-list-item"><input type="checkbox" checked disabled> text</li>
//!   editor:  <ul data-type="taskList">
//!              <li data-type="taskItem" data-checked="true">text</li>
//!
//! [`to_editor_dialect`] rewrites the GFM shape into the dialect after a
//! Markdown-to-HTML conversion; [`to_gfm_shape`] reverses it before an
//! HTML-to-Markdown conversion. Both process a parent before its children so
//! container detection happens before item detection, and nested task lists
//! keep a marker on every level.

use crate::ast::html::{HtmlNode, Properties, PropertyValue};

const TASK_LIST_TYPE: &str = "taskList";
const TASK_ITEM_TYPE: &str = "taskItem";
const TASK_LIST_CLASS: &str = "contains-task-list";
const TASK_ITEM_CLASS: &str = "task-list-item";

/// Rewrite standard GFM task-list markup into the editor dialect.
pub fn to_editor_dialect(node: &mut HtmlNode) {
    if node.is_element("ul") && is_task_list_container(node) {
        rewrite_container(node);
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            to_editor_dialect(child);
        }
    }
}

fn is_task_list_container(node: &HtmlNode) -> bool {
    node.properties().has_class(TASK_LIST_CLASS)
        || node
            .children()
            .iter()
            .any(|child| child.is_element("li") && detect_task_item(child).is_some())
}

fn rewrite_container(node: &mut HtmlNode) {
    // detect items before mutating the container
    let detected: Vec<Option<(bool, Vec<HtmlNode>)>> = node
        .children()
        .iter()
        .map(|child| {
            if child.is_element("li") {
                detect_task_item(child)
            } else {
                None
            }
        })
        .collect();

    if let Some(properties) = node.properties_mut() {
        properties.remove("class");
        properties.set("data-type", PropertyValue::Text(TASK_LIST_TYPE.to_string()));
    }
    let Some(children) = node.children_mut() else {
        return;
    };
    for (child, detection) in children.iter_mut().zip(detected) {
        let Some((checked, inline_children)) = detection else {
            continue;
        };
        if let HtmlNode::Element {
            properties,
            children,
            ..
        } = child
        {
            properties.remove("class");
            properties.set("data-type", PropertyValue::Text(TASK_ITEM_TYPE.to_string()));
            properties.set(
                "data-checked",
                PropertyValue::Text(if checked { "true" } else { "false" }.to_string()),
            );
            *children = inline_children;
        }
    }
}

/// Recognize a task `<li>` and produce its checked state plus the children
/// that remain once checkbox/label wrapper markup is stripped.
///
/// Detection, in order: the GFM item class; an embedded checkbox input
/// (possibly inside a label); a marker-only text pattern (`[ ]`, `[x]`,
/// `[X]`), optionally wrapped in a paragraph, when neither class nor checkbox
/// is present.
fn detect_task_item(item: &HtmlNode) -> Option<(bool, Vec<HtmlNode>)> {
    let has_item_class = item.properties().has_class(TASK_ITEM_CLASS);

    if let Some((checked, stripped)) = strip_checkbox(item.children()) {
        return Some((checked, stripped));
    }
    if has_item_class {
        // class without a findable checkbox: treat as unchecked, keep content
        return Some((false, item.children().to_vec()));
    }
    strip_marker_text(item.children())
}

/// Find a checkbox input among the item's immediate children (or inside a
/// leading label) and return the checked state plus the remaining content.
fn strip_checkbox(children: &[HtmlNode]) -> Option<(bool, Vec<HtmlNode>)> {
    let mut checked = None;
    let mut rest: Vec<HtmlNode> = Vec::new();

    for child in children {
        if checked.is_none() {
            if is_checkbox(child) {
                checked = Some(checkbox_state(child));
                continue;
            }
            if child.is_element("label") {
                if let Some(input) = child.children().iter().find(|c| is_checkbox(c)) {
                    checked = Some(checkbox_state(input));
                    // the label wrapper (checkbox + decoration) is dropped whole
                    continue;
                }
            }
        }
        rest.push(child.clone());
    }

    let checked = checked?;
    // the space separating the checkbox from the text is part of the wrapper
    if let Some(HtmlNode::Text { value }) = rest.first_mut() {
        if let Some(stripped) = value.strip_prefix(' ') {
            *value = stripped.to_string();
        }
        if value.is_empty() {
            rest.remove(0);
        }
    }
    Some((checked, rest))
}

fn is_checkbox(node: &HtmlNode) -> bool {
    node.is_element("input")
        && node
            .properties()
            .get("type")
            .and_then(PropertyValue::as_text)
            == Some("checkbox")
}

fn checkbox_state(node: &HtmlNode) -> bool {
    node.properties()
        .get("checked")
        .is_some_and(PropertyValue::is_set)
}

/// Recognize a `[ ]` / `[x]` / `[X]` marker at the start of the item's text,
/// optionally wrapped in a paragraph, and strip it.
fn strip_marker_text(children: &[HtmlNode]) -> Option<(bool, Vec<HtmlNode>)> {
    let (first, rest) = children.split_first()?;

    if let HtmlNode::Element {
        tag,
        properties,
        children: inner,
    } = first
    {
        if tag == "p" {
            let (checked, stripped_inner) = strip_marker_text(inner)?;
            let mut out = vec![HtmlNode::Element {
                tag: tag.clone(),
                properties: properties.clone(),
                children: stripped_inner,
            }];
            out.extend(rest.iter().cloned());
            return Some((checked, out));
        }
    }

    let HtmlNode::Text { value } = first else {
        return None;
    };
    let (checked, marker_len) = parse_marker(value)?;
    let remainder = value[marker_len..].trim_start_matches(' ');
    let mut out = Vec::new();
    if !remainder.is_empty() {
        out.push(HtmlNode::text(remainder));
    }
    out.extend(rest.iter().cloned());
    Some((checked, out))
}

fn parse_marker(text: &str) -> Option<(bool, usize)> {
    for (marker, checked) in [("[ ]", false), ("[x]", true), ("[X]", true)] {
        if let Some(rest) = text.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some((checked, marker.len()));
            }
        }
    }
    None
}

/// Reverse-translate the editor dialect back into the standard GFM shape.
pub fn to_gfm_shape(node: &mut HtmlNode) {
    if let HtmlNode::Element {
        tag,
        properties,
        children,
    } = node
    {
        if tag == "ul"
            && properties.get("data-type").and_then(PropertyValue::as_text) == Some(TASK_LIST_TYPE)
        {
            properties.remove("data-type");
            properties.set(
                "class",
                PropertyValue::Tokens(vec![TASK_LIST_CLASS.to_string()]),
            );
        }

        if tag == "li"
            && properties.get("data-type").and_then(PropertyValue::as_text) == Some(TASK_ITEM_TYPE)
        {
            let checked = match properties.remove("data-checked") {
                Some(PropertyValue::Text(value)) => value == "true" || value.is_empty(),
                Some(PropertyValue::Flag(set)) => set,
                Some(PropertyValue::Tokens(_)) | None => false,
            };
            properties.remove("data-type");
            properties.set(
                "class",
                PropertyValue::Tokens(vec![TASK_ITEM_CLASS.to_string()]),
            );

            // Replace the editor's <label>..</label><div><p>text</p></div>
            // wrapper with `<input type="checkbox" disabled [checked]> text`
            let mut inline: Vec<HtmlNode> = Vec::new();
            for child in children.iter() {
                match child {
                    HtmlNode::Element {
                        tag,
                        children: nested,
                        ..
                    } if tag == "div" || tag == "p" => {
                        for node in nested {
                            if node.is_element("p") {
                                inline.extend(node.children().iter().cloned());
                            } else {
                                inline.push(node.clone());
                            }
                        }
                    }
                    HtmlNode::Element { tag, .. } if tag == "label" => {}
                    other => inline.push(other.clone()),
                }
            }

            let mut checkbox_properties = Properties::new();
            checkbox_properties.set("type", PropertyValue::Text("checkbox".to_string()));
            checkbox_properties.set("disabled", PropertyValue::Flag(true));
            if checked {
                checkbox_properties.set("checked", PropertyValue::Flag(true));
            }
            let mut rebuilt = vec![
                HtmlNode::element("input", checkbox_properties, vec![]),
                HtmlNode::text(" "),
            ];
            rebuilt.append(&mut inline);
            *children = rebuilt;
        }
    }

    if let Some(children) = node.children_mut() {
        for child in children {
            to_gfm_shape(child);
        }
    }
}
