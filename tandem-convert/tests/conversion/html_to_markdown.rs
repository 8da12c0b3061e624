//! Editor HTML → Markdown conversion tests.

use tandem_convert::html_to_markdown;

fn convert(html: &str) -> String {
    html_to_markdown(html).expect("conversion should succeed")
}

#[test]
fn headings() {
    assert_eq!(convert("<h2>Title</h2>").trim(), "## Title");
}

#[test]
fn bold_and_italic() {
    assert_eq!(
        convert("<p><strong>bold</strong> and <em>italic</em></p>").trim(),
        "**bold** and *italic*"
    );
}

#[test]
fn strikethrough() {
    assert_eq!(convert("<p><del>removed</del></p>").trim(), "~~removed~~");
}

#[test]
fn link() {
    assert_eq!(
        convert("<p><a href=\"https://example.com\">click</a></p>").trim(),
        "[click](https://example.com)"
    );
}

#[test]
fn editor_link_backup_attribute_is_restored() {
    assert_eq!(
        convert("<p><a href=\"#\" data-href=\"https://example.com/page\">click</a></p>").trim(),
        "[click](https://example.com/page)"
    );
}

#[test]
fn image() {
    assert_eq!(convert("<p><img src=\"a.png\" alt=\"pic\"></p>").trim(), "![pic](a.png)");
}

#[test]
fn table() {
    let md = convert(
        "<table><thead><tr><th>X</th></tr></thead><tbody><tr><td>1</td></tr></tbody></table>",
    );
    assert!(md.contains("| X |"));
    assert!(md.contains("| 1 |"));
    assert!(md.contains("| --- |"));
}

#[test]
fn editor_task_list_html_normalizes_to_gfm() {
    let editor_html = concat!(
        "<ul data-type=\"taskList\">",
        "<li data-type=\"taskItem\" data-checked=\"false\"><label><input type=\"checkbox\">",
        "<span></span></label><div><p>todo</p></div></li>",
        "<li data-type=\"taskItem\" data-checked=\"true\"><label><input type=\"checkbox\" ",
        "checked=\"checked\"><span></span></label><div><p>done</p></div></li>",
        "</ul>"
    );
    let md = convert(editor_html);
    assert!(md.contains("[ ] todo"), "unchecked marker missing: {md}");
    assert!(md.contains("[x] done"), "checked marker missing: {md}");
}

#[test]
fn checkbox_shaped_task_list_converts_too() {
    let md = convert(
        "<ul class=\"contains-task-list\">\
         <li class=\"task-list-item\"><input type=\"checkbox\" disabled> todo</li>\
         <li class=\"task-list-item\"><input type=\"checkbox\" checked disabled> done</li>\
         </ul>",
    );
    assert_eq!(md.trim(), "- [ ] todo\n- [x] done");
}

#[test]
fn editor_table_html_converts() {
    let editor_html = concat!(
        "<table><tbody><tr><th colspan=\"1\" rowspan=\"1\"><p>A</p></th></tr>",
        "<tr><td colspan=\"1\" rowspan=\"1\"><p>1</p></td></tr></tbody></table>"
    );
    let md = convert(editor_html);
    assert!(md.contains("| A |"));
    assert!(md.contains("| 1 |"));
}

#[test]
fn bullet_list_is_tight() {
    assert_eq!(convert("<ul><li>a</li><li>b</li></ul>").trim(), "- a\n- b");
}

#[test]
fn loose_editor_list_renders_tight() {
    assert_eq!(
        convert("<ul><li><p>a</p></li><li><p>b</p></li></ul>").trim(),
        "- a\n- b"
    );
}

#[test]
fn uses_dash_bullets() {
    let md = convert("<ul><li>item</li></ul>");
    assert!(md.starts_with("- "));
}

#[test]
fn fragmented_emphasis_around_link_merges() {
    let md = convert(
        "<p><em>text </em><a href=\"https://example.com\"><em>link text</em></a><em> text</em></p>",
    );
    assert_eq!(md.trim(), "*text [link text](https://example.com) text*");
}

#[test]
fn fragmented_emphasis_around_strong_merges_on_whitespace_boundary() {
    let md = convert("<p><em>a </em><strong>b</strong><em> c</em></p>");
    assert_eq!(md.trim(), "*a **b** c*");
}

#[test]
fn adjacent_emphasis_without_whitespace_is_not_merged() {
    let md = convert("<p><em>a</em><strong>b</strong><em>c</em></p>");
    assert!(md.contains("**b**"));
    assert!(!md.contains("*a **b** c*"));
}

#[test]
fn nested_redundant_emphasis_collapses() {
    let md = convert("<p><em><em>doubled</em></em></p>");
    assert_eq!(md.trim(), "*doubled*");
}
