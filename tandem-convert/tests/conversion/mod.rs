//! Conversion pipeline tests
//!
//! Bidirectional Markdown ↔ editor HTML conversion, comment sidecar handling
//! and round-trip stability.

mod comments;
mod html_to_markdown;
mod markdown_to_html;
mod round_trip;
