//! Markdown side of the pipeline.
//!
//! # Library Choice
//!
//! Parsing uses the `comrak` crate: CommonMark-compliant, well maintained,
//! and covering the GFM extensions this pipeline needs (tables,
//! strikethrough, autolinks, task lists). Serialization is owned by this
//! crate because the output choices are part of the editor round-trip
//! contract: dash bullets, asterisk emphasis, unconditionally tight lists,
//! and task markers spliced directly after the list marker.

pub mod from_html;
pub mod parser;
pub mod serializer;
