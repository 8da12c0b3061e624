//! Markdown serialization (MdNode tree → Markdown text)
//!
//! Output choices that are part of the editor round-trip contract:
//! - bullet marker `-`, emphasis marker `*`
//! - tight lists render without blank lines between items
//! - task items always render a `[ ]`/`[x]` marker directly after the list
//!   marker, spliced into the rendered item so the marker survives even for
//!   items that lack the checkbox-derived shape
//! - escaping is plain backslash escaping; no character references

use crate::ast::markdown::{AlignKind, MdNode};

/// Serialize a Markdown tree to text. The output ends with a single newline.
pub fn serialize_markdown(root: &MdNode) -> String {
    let blocks: Vec<String> = root
        .children()
        .iter()
        .filter_map(render_block)
        .filter(|block| !block.is_empty())
        .collect();
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn render_block(node: &MdNode) -> Option<String> {
    match node {
        MdNode::Paragraph { children } => Some(render_inline(children, true)),
        MdNode::Heading { depth, children } => {
            let hashes = "#".repeat(usize::from(*depth).clamp(1, 6));
            Some(format!("{hashes} {}", render_inline(children, false)))
        }
        MdNode::Blockquote { children } => {
            let inner: Vec<String> = children.iter().filter_map(render_block).collect();
            let body = inner.join("\n\n");
            let quoted: Vec<String> = body
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {line}")
                    }
                })
                .collect();
            Some(quoted.join("\n"))
        }
        MdNode::Code { lang, value } => {
            let fence = if value.contains("```") { "````" } else { "```" };
            let info = lang.as_deref().unwrap_or("");
            let mut body = value.clone();
            if !body.is_empty() && !body.ends_with('\n') {
                body.push('\n');
            }
            Some(format!("{fence}{info}\n{body}{fence}"))
        }
        MdNode::ThematicBreak => Some("---".to_string()),
        MdNode::Html { value } => Some(value.clone()),
        MdNode::List {
            ordered,
            start,
            spread,
            children,
        } => Some(render_list(*ordered, *start, *spread, children)),
        MdNode::Table { align, children } => Some(render_table(align, children)),
        // bare phrasing content in a block position
        other => Some(render_inline(std::slice::from_ref(other), true)),
    }
}

fn render_list(ordered: bool, start: Option<u64>, spread: bool, items: &[MdNode]) -> String {
    let first = start.unwrap_or(1);
    let rendered: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if ordered {
                format!("{}. ", first + index as u64)
            } else {
                "- ".to_string()
            };
            render_list_item(item, &marker)
        })
        .collect();
    rendered.join(if spread { "\n\n" } else { "\n" })
}

fn render_list_item(item: &MdNode, marker: &str) -> String {
    let MdNode::ListItem {
        checked,
        spread,
        children,
    } = item
    else {
        return marker.trim_end().to_string();
    };

    if let Some(checked) = checked {
        // the default renderer only knows about blocks; guarantee a leading
        // paragraph so the rendered item has a first line to splice into
        let mut children = children.clone();
        if !matches!(children.first(), Some(MdNode::Paragraph { .. })) {
            children.insert(0, MdNode::Paragraph { children: vec![] });
        }
        let rendered = render_default_item(&children, *spread, marker);
        return splice_task_marker(&rendered, marker, *checked);
    }

    render_default_item(children, *spread, marker)
}

fn render_default_item(children: &[MdNode], spread: bool, marker: &str) -> String {
    let blocks: Vec<String> = children.iter().filter_map(render_block).collect();
    let body = blocks.join(if spread { "\n\n" } else { "\n" });
    if body.is_empty() {
        return marker.trim_end().to_string();
    }

    let indent = " ".repeat(marker.len());
    let mut lines = body.lines();
    let first = lines.next().unwrap_or("");
    let mut out = if first.is_empty() {
        marker.trim_end().to_string()
    } else {
        format!("{marker}{first}")
    };
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}

/// Splice a literal task marker directly after the rendered list marker.
///
/// Three marker-tail shapes occur: the marker immediately followed by a
/// newline, a marker-only line, and the marker followed by an inline space.
fn splice_task_marker(rendered: &str, marker: &str, checked: bool) -> String {
    let token = marker.trim_end();
    let task = if checked { "[x]" } else { "[ ]" };

    if let Some(rest) = rendered.strip_prefix(token) {
        if let Some(tail) = rest.strip_prefix('\n') {
            return format!("{token} {task}\n{tail}");
        }
        if rest.is_empty() {
            return format!("{token} {task}");
        }
        if let Some(tail) = rest.strip_prefix(' ') {
            return format!("{token} {task} {tail}");
        }
    }
    rendered.to_string()
}

fn render_table(align: &[AlignKind], rows: &[MdNode]) -> String {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.children()
                .iter()
                .map(|cell| render_inline(cell.children(), false).replace('|', "\\|"))
                .collect()
        })
        .collect();

    let columns = rendered.iter().map(Vec::len).max().unwrap_or(0);
    let mut lines = Vec::new();
    for (index, cells) in rendered.iter().enumerate() {
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            let separators: Vec<&str> = (0..columns)
                .map(|column| match align.get(column) {
                    Some(AlignKind::Left) => ":--",
                    Some(AlignKind::Center) => ":-:",
                    Some(AlignKind::Right) => "--:",
                    _ => "---",
                })
                .collect();
            lines.push(format!("| {} |", separators.join(" | ")));
        }
    }
    lines.join("\n")
}

fn render_inline(nodes: &[MdNode], mut at_line_start: bool) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            MdNode::Text { value } => {
                out.push_str(&escape_text(value, at_line_start));
                at_line_start = false;
            }
            MdNode::Emphasis { children } => {
                out.push('*');
                out.push_str(&render_inline(children, false));
                out.push('*');
                at_line_start = false;
            }
            MdNode::Strong { children } => {
                out.push_str("**");
                out.push_str(&render_inline(children, false));
                out.push_str("**");
                at_line_start = false;
            }
            MdNode::Delete { children } => {
                out.push_str("~~");
                out.push_str(&render_inline(children, false));
                out.push_str("~~");
                at_line_start = false;
            }
            MdNode::InlineCode { value } => {
                out.push_str(&render_inline_code(value));
                at_line_start = false;
            }
            MdNode::Break => {
                out.push_str("\\\n");
                at_line_start = true;
            }
            MdNode::Link {
                url,
                title,
                children,
            } => {
                out.push('[');
                out.push_str(&render_inline(children, false));
                out.push_str("](");
                out.push_str(&render_url(url));
                out.push_str(&render_title(title));
                out.push(')');
                at_line_start = false;
            }
            MdNode::Image { url, alt, title } => {
                out.push_str("![");
                out.push_str(&escape_text(alt, false));
                out.push_str("](");
                out.push_str(&render_url(url));
                out.push_str(&render_title(title));
                out.push(')');
                at_line_start = false;
            }
            MdNode::Html { value } => {
                out.push_str(value);
                at_line_start = false;
            }
            other => {
                out.push_str(&render_inline(other.children(), at_line_start));
                at_line_start = false;
            }
        }
    }
    out
}

fn render_inline_code(value: &str) -> String {
    let longest_run = value
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if value.starts_with('`') || value.ends_with('`') {
        format!("{fence} {value} {fence}")
    } else {
        format!("{fence}{value}{fence}")
    }
}

fn render_url(url: &str) -> String {
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}

fn render_title(title: &Option<String>) -> String {
    match title {
        Some(title) => format!(" \"{}\"", title.replace('"', "\\\"")),
        None => String::new(),
    }
}

/// Backslash-escape Markdown syntax characters in literal text. Inline text
/// never carries newlines into the output; they collapse to spaces.
fn escape_text(text: &str, mut at_line_start: bool) -> String {
    let sanitized = text.replace('\n', " ");
    let chars: Vec<char> = sanitized.chars().collect();
    let mut out = String::with_capacity(sanitized.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            '~' if chars.get(i + 1) == Some(&'~') => {
                out.push('\\');
                out.push(c);
            }
            '#' | '>' if at_line_start => {
                out.push('\\');
                out.push(c);
            }
            '+' | '-' if at_line_start && matches!(chars.get(i + 1), None | Some(' ')) => {
                out.push('\\');
                out.push(c);
            }
            '0'..='9' if at_line_start => {
                let mut j = i;
                while j < chars.len() && chars[j].is_ascii_digit() {
                    j += 1;
                }
                if matches!(chars.get(j), Some('.') | Some(')'))
                    && matches!(chars.get(j + 1), None | Some(' '))
                {
                    out.extend(&chars[i..j]);
                    out.push('\\');
                    out.push(chars[j]);
                    i = j + 1;
                    at_line_start = false;
                    continue;
                }
                out.push(c);
            }
            _ => out.push(c),
        }
        at_line_start = false;
        i += 1;
    }
    out
}
