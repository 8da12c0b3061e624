//! Bidirectional conversion between Markdown documents and editor HTML
//!
//!     This crate converts between a persisted Markdown document (CommonMark + GFM)
//!     and the HTML dialect used by a rich-text editing surface. Both directions are
//!     a fixed, ordered sequence of tree rewrite passes bracketing a standards-based
//!     parse/serialize core.
//!
//!     TLDR: for pass authors:
//!         - The crate never hand-parses Markdown or HTML; parsing is delegated to
//!           comrak (Markdown) and html5ever (HTML).
//!         - Rewrite passes operate on the crate-owned trees (./ast/), never on the
//!           library ASTs directly. Convert in, rewrite, convert out.
//!         - Pass ordering is load-bearing; see ./pipeline.rs for the rationale.
//!
//! Architecture
//!
//!     Two tree shapes, both closed tagged variants:
//!     - [`ast::html::HtmlNode`]: elements with tag name, ordered attributes and
//!       ordered children, plus text and comment leaves.
//!     - [`ast::markdown::MdNode`]: typed Markdown nodes; optional fields (`checked`,
//!       `ordered`, `start`, `spread`) are only meaningful on the variants that carry
//!       them.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── ast
//!     │   ├── html.rs         # HTML-like tree + structural helpers
//!     │   └── markdown.rs     # Markdown-AST tree + structural helpers
//!     ├── html
//!     │   ├── parser.rs       # html5ever fragment parse -> HtmlNode
//!     │   ├── serializer.rs   # HtmlNode -> rcdom -> HTML string
//!     │   └── from_md.rs      # MdNode -> HtmlNode (GFM HTML shapes)
//!     ├── markdown
//!     │   ├── parser.rs       # comrak parse -> MdNode
//!     │   ├── serializer.rs   # MdNode -> Markdown text
//!     │   └── from_html.rs    # HtmlNode -> MdNode (GFM-aware)
//!     ├── transforms
//!     │   ├── inline_marks.rs # fragmented emphasis/strong/delete normalization
//!     │   ├── task_list.rs    # GFM <-> editor task-list dialect
//!     │   ├── links.rs        # editor link-attribute restoration
//!     │   └── tight_lists.rs  # force tight list rendering
//!     ├── comments.rs         # leading HTML comment sidecar
//!     └── pipeline.rs         # the two directional pipelines
//!
//! Library Choices
//!
//!     We use `comrak` for Markdown parsing: a single well-maintained crate with
//!     CommonMark compliance and the GFM extensions we need (tables, strikethrough,
//!     autolinks, task lists). HTML parsing and serialization go through `html5ever`
//!     and `markup5ever_rcdom`, which give us spec-compliant fragment handling and
//!     entity escaping for free. Markdown serialization is owned by this crate
//!     because its output choices (dash bullets, asterisk emphasis, tight lists,
//!     task markers spliced after the list marker) are part of the round-trip
//!     contract with the editor.

pub mod ast;
pub mod comments;
pub mod error;
pub mod html;
pub mod markdown;
pub mod pipeline;
pub mod transforms;

pub use comments::{extract_html_comments, restore_html_comments, ExtractedComments};
pub use error::ConvertError;
pub use pipeline::{html_to_markdown, markdown_to_html};
