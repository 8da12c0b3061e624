//! Synchronization layer between a persisted Markdown document and a
//! rich-text editing surface.
//!
//!     One [`engine::DocumentSync`] instance owns the mutable state for one
//!     open document. It is driven by five external events: editor-ready,
//!     editor-update, document-will-save, document-did-change and
//!     document-open. There are no named states beyond the session flags;
//!     behavior is event-driven with guard conditions.
//!
//!     The document text is the source of truth at rest. Editor edits are
//!     debounced and flushed into full-document replacements; document
//!     changes made by anything else are converted and pushed back to the
//!     editor. Both directions carry sequence numbers so stale messages
//!     cannot regress state, and every write this engine makes is tracked so
//!     its own change notification can be recognized and suppressed instead
//!     of echoing back into the editor.
//!
//! Concurrency model
//!
//!     Single-threaded cooperative scheduling: all work for one document runs
//!     on one logical task queue, and event handlers take the session state
//!     by exclusive reference, so no two handlers for the same document run
//!     concurrently. Conversions and document-apply operations are the
//!     suspension points; the debounce timer is a single cancellable
//!     deadline, reset (never stacked) on every accepted editor update.

pub mod convert;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod images;
pub mod links;
pub mod options;
pub mod protocol;
pub mod selection;
pub mod state;

pub use engine::{DocumentSync, SyncEvent, SyncHost};
pub use error::SyncError;
pub use options::SyncOptions;
pub use state::canonicalize_markdown_for_sync;
