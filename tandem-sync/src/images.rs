//! Image-src rewriting between document-relative and display-absolute forms.
//!
//! The persisted Markdown references images relative to the document; the
//! editing surface needs absolute URIs it can actually load. `resolve`
//! rewrites relative srcs against the document's base location after a
//! Markdown-to-HTML conversion, `restore` relativizes them again before an
//! HTML-to-Markdown conversion. Absolute `http(s):` and `data:` URIs are
//! exempt in both directions; anything unparseable passes through unchanged.

use tandem_convert::ast::html::{HtmlNode, PropertyValue};
use tandem_convert::html::parser::parse_html_fragment;
use tandem_convert::html::serializer::serialize_html;
use url::Url;

#[derive(Debug, Clone)]
pub struct ImageRewriter {
    base: Url,
}

impl ImageRewriter {
    /// `base` is the location the document's relative references resolve
    /// against; a trailing slash is ensured so joins stay inside it.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        ImageRewriter { base }
    }

    /// Rewrite relative image srcs to absolute URIs for display.
    pub fn resolve(&self, html: &str) -> String {
        self.rewrite(html, |src, base| {
            if is_exempt(src) {
                return None;
            }
            base.join(src).ok().map(|absolute| absolute.to_string())
        })
    }

    /// Restore absolute URIs under the base back to document-relative srcs.
    pub fn restore(&self, html: &str) -> String {
        self.rewrite(html, |src, base| {
            src.strip_prefix(base.as_str())
                .map(|relative| relative.trim_start_matches('/').to_string())
        })
    }

    fn rewrite(&self, html: &str, map_src: impl Fn(&str, &Url) -> Option<String>) -> String {
        let Ok(mut tree) = parse_html_fragment(html) else {
            return html.to_string();
        };
        rewrite_image_srcs(&mut tree, &|src| map_src(src, &self.base));
        serialize_html(&tree).unwrap_or_else(|_| html.to_string())
    }
}

fn is_exempt(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:")
}

fn rewrite_image_srcs(node: &mut HtmlNode, map_src: &impl Fn(&str) -> Option<String>) {
    if node.is_image_node() {
        let current = node
            .properties()
            .get("src")
            .and_then(PropertyValue::as_text)
            .map(str::to_string);
        if let Some(src) = current {
            if let Some(mapped) = map_src(&src) {
                if let Some(properties) = node.properties_mut() {
                    properties.set("src", PropertyValue::Text(mapped));
                }
            }
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            rewrite_image_srcs(child, map_src);
        }
    }
}
