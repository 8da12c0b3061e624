//! Leading HTML comment sidecar.
//!
//! `<!-- -->` is the only comment syntax CommonMark/GFM recognizes, and the
//! rich-text representation cannot carry comments at all. A leading run of
//! comment blocks is split off before conversion and reattached verbatim on
//! every Markdown emission. Comments elsewhere in the body are left in place
//! and will not survive the round trip.

/// Result of splitting a document into its leading comments and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedComments {
    pub comments: String,
    pub body: String,
}

/// Extract a leading run of HTML comment blocks (optionally separated by
/// blank lines) anchored at the document start. Without a match the body is
/// the full text unchanged.
pub fn extract_html_comments(markdown: &str) -> ExtractedComments {
    let mut end = 0;
    loop {
        let rest = &markdown[end..];
        let whitespace = rest.len() - rest.trim_start().len();
        let after = &rest[whitespace..];
        if let Some(stripped) = after.strip_prefix("<!--") {
            if let Some(close) = stripped.find("-->") {
                end += whitespace + 4 + close + 3;
                continue;
            }
        }
        break;
    }

    if end == 0 {
        return ExtractedComments {
            comments: String::new(),
            body: markdown.to_string(),
        };
    }

    // trailing whitespace after the last comment belongs to the matched span
    let tail = &markdown[end..];
    end += tail.len() - tail.trim_start().len();

    ExtractedComments {
        comments: markdown[..end].trim_end().to_string(),
        body: markdown[end..].trim_start_matches('\n').to_string(),
    }
}

/// Re-attach previously extracted comments, separated from the body by
/// exactly one blank line.
pub fn restore_html_comments(comments: &str, markdown: &str) -> String {
    if comments.is_empty() {
        return markdown.to_string();
    }
    format!("{comments}\n\n{markdown}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_comments_returns_empty_and_full_body() {
        let extracted = extract_html_comments("# Title\n\nBody");
        assert_eq!(extracted.comments, "");
        assert_eq!(extracted.body, "# Title\n\nBody");
    }

    #[test]
    fn single_leading_comment() {
        let extracted = extract_html_comments("<!-- note -->\n\n# Title");
        assert_eq!(extracted.comments, "<!-- note -->");
        assert_eq!(extracted.body, "# Title");
    }

    #[test]
    fn multiple_leading_comments() {
        let extracted = extract_html_comments("<!-- a -->\n<!-- b -->\n\n# Title");
        assert_eq!(extracted.comments, "<!-- a -->\n<!-- b -->");
        assert_eq!(extracted.body, "# Title");
    }

    #[test]
    fn blank_line_between_comments_is_allowed() {
        let extracted = extract_html_comments("<!-- a -->\n\n<!-- b -->\n\nBody");
        assert_eq!(extracted.comments, "<!-- a -->\n\n<!-- b -->");
        assert_eq!(extracted.body, "Body");
    }

    #[test]
    fn inline_comment_is_not_extracted() {
        let input = "# Title\n\n<!-- inline -->\n\nBody";
        let extracted = extract_html_comments(input);
        assert_eq!(extracted.comments, "");
        assert_eq!(extracted.body, input);
    }

    #[test]
    fn unterminated_comment_is_left_alone() {
        let input = "<!-- never closed\n# Title";
        let extracted = extract_html_comments(input);
        assert_eq!(extracted.comments, "");
        assert_eq!(extracted.body, input);
    }

    #[test]
    fn restore_empty_comments_returns_markdown_unchanged() {
        assert_eq!(restore_html_comments("", "# Title"), "# Title");
    }

    #[test]
    fn restore_prepends_with_blank_line_separator() {
        assert_eq!(
            restore_html_comments("<!-- note -->", "# Title"),
            "<!-- note -->\n\n# Title"
        );
    }
}
