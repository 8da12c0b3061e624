//! Markdown → editor HTML conversion tests.

use tandem_convert::markdown_to_html;

fn convert(md: &str) -> String {
    markdown_to_html(md).expect("conversion should succeed")
}

#[test]
fn headings() {
    assert_eq!(convert("# Hello"), "<h1>Hello</h1>");
}

#[test]
fn bold_and_italic() {
    assert_eq!(
        convert("**bold** and *italic*"),
        "<p><strong>bold</strong> and <em>italic</em></p>"
    );
}

#[test]
fn strikethrough() {
    assert_eq!(convert("~~deleted~~"), "<p><del>deleted</del></p>");
}

#[test]
fn inline_code() {
    assert_eq!(convert("use `fmt.Println`"), "<p>use <code>fmt.Println</code></p>");
}

#[test]
fn fenced_code_block() {
    assert_eq!(
        convert("```js\nalert(1)\n```"),
        "<pre><code class=\"language-js\">alert(1)\n</code></pre>"
    );
}

#[test]
fn blockquote() {
    assert_eq!(convert("> quote"), "<blockquote>\n<p>quote</p>\n</blockquote>");
}

#[test]
fn bullet_list() {
    assert_eq!(convert("- a\n- b"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
}

#[test]
fn ordered_list() {
    assert_eq!(convert("1. a\n2. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
}

#[test]
fn task_list_uses_editor_dialect() {
    let html = convert("- [ ] todo\n- [x] done");
    assert_eq!(
        html,
        "<ul data-type=\"taskList\">\n\
         <li data-type=\"taskItem\" data-checked=\"false\">todo</li>\n\
         <li data-type=\"taskItem\" data-checked=\"true\">done</li>\n\
         </ul>"
    );
}

#[test]
fn nested_task_lists_keep_container_markers_per_level() {
    let html = convert("- [ ] outer\n  - [x] inner");
    let container_markers = html.matches("data-type=\"taskList\"").count();
    assert_eq!(container_markers, 2, "both levels need a container marker: {html}");
    assert!(html.contains("data-checked=\"false\""));
    assert!(html.contains("data-checked=\"true\""));
}

#[test]
fn link() {
    assert_eq!(
        convert("[text](https://example.com)"),
        "<p><a href=\"https://example.com\">text</a></p>"
    );
}

#[test]
fn autolink() {
    assert_eq!(
        convert("https://example.com"),
        "<p><a href=\"https://example.com\">https://example.com</a></p>"
    );
}

#[test]
fn image() {
    assert_eq!(convert("![alt](img.png)"), "<p><img src=\"img.png\" alt=\"alt\"></p>");
}

#[test]
fn table() {
    let html = convert("| A | B |\n| --- | --- |\n| 1 | 2 |");
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>A</th>"));
    assert!(html.contains("<td>1</td>"));
    assert!(html.contains("<tbody>"));
}

#[test]
fn horizontal_rule() {
    assert_eq!(convert("---"), "<hr>");
}

#[test]
fn raw_html_blocks_are_dropped() {
    let html = convert("before\n\n<div custom>raw</div>\n\nafter");
    assert!(html.contains("<p>before</p>"));
    assert!(html.contains("<p>after</p>"));
    assert!(!html.contains("custom"));
}
