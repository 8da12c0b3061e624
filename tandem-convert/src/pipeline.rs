//! The two directional conversion pipelines.
//!
//! Each direction is a fixed, ordered pass sequence around the parse and
//! serialize cores. Ordering is load-bearing:
//! - link restoration runs before everything else on the HTML side because
//!   later passes and the Markdown transform need working `href` values;
//! - task-dialect reversal runs before the Markdown transform so task items
//!   arrive in the checkbox shape the transform recognizes;
//! - tight-list forcing operates on the Markdown tree, so it follows the
//!   HTML-to-Markdown transform;
//! - inline-mark normalization is the last tree pass before serialization
//!   since it only has meaning on the fully GFM-structured tree.

use crate::error::ConvertError;
use crate::html;
use crate::markdown;
use crate::transforms;

/// Convert GFM Markdown to editor HTML.
pub fn markdown_to_html(markdown_text: &str) -> Result<String, ConvertError> {
    let tree = markdown::parser::parse_markdown(markdown_text)?;
    let mut html_tree = html::from_md::md_to_html_tree(&tree);
    transforms::task_list::to_editor_dialect(&mut html_tree);
    html::serializer::serialize_html(&html_tree)
}

/// Convert editor HTML to GFM Markdown.
pub fn html_to_markdown(html_text: &str) -> Result<String, ConvertError> {
    let mut tree = html::parser::parse_html_fragment(html_text)?;
    transforms::links::restore_editor_links(&mut tree);
    transforms::task_list::to_gfm_shape(&mut tree);
    let mut md_tree = markdown::from_html::html_tree_to_md(&tree);
    transforms::tight_lists::force_tight(&mut md_tree);
    transforms::inline_marks::normalize_inline_marks(&mut md_tree);
    Ok(markdown::serializer::serialize_markdown(&md_tree))
}
