//! HTML side of the pipeline: html5ever parse/serialize plus the
//! Markdown-tree to HTML-tree transform.

pub mod from_md;
pub mod parser;
pub mod serializer;
