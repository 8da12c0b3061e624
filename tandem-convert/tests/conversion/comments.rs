//! Comment sidecar tests over the public API.

use tandem_convert::{extract_html_comments, restore_html_comments};

#[test]
fn extract_without_leading_comment() {
    let extracted = extract_html_comments("# Title\n\nBody");
    assert_eq!(extracted.comments, "");
    assert_eq!(extracted.body, "# Title\n\nBody");
}

#[test]
fn extract_leading_run() {
    let extracted = extract_html_comments("<!-- a -->\n<!-- b -->\n\n# Title");
    assert_eq!(extracted.comments, "<!-- a -->\n<!-- b -->");
    assert_eq!(extracted.body, "# Title");
}

#[test]
fn restore_joins_with_one_blank_line() {
    assert_eq!(
        restore_html_comments("<!-- note -->", "# Title"),
        "<!-- note -->\n\n# Title"
    );
}

#[test]
fn extract_then_restore_round_trips() {
    let document = "<!-- keep: me -->\n\n# Title\n\nBody\n";
    let extracted = extract_html_comments(document);
    let rebuilt = restore_html_comments(&extracted.comments, &extracted.body);
    assert_eq!(rebuilt, "<!-- keep: me -->\n\n# Title\n\nBody\n");
}

#[test]
fn multiline_comment_block_is_opaque() {
    let document = "<!-- line one\nline two -->\nBody";
    let extracted = extract_html_comments(document);
    assert_eq!(extracted.comments, "<!-- line one\nline two -->");
    assert_eq!(extracted.body, "Body");
}
