//! Selection restoration across content replacements.
//!
//! When new content is pushed into the editor the caret position would be
//! lost; the previous selection is restored only when it still fits the new
//! document. Out-of-range selections yield `None` rather than being clamped,
//! so the editor falls back to its own default placement.

use serde::{Deserialize, Serialize};

/// Character-offset selection pair as the editor reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub from: i64,
    pub to: i64,
}

/// The selection to restore after content replacement, or `None` when the
/// stored range no longer fits.
pub fn restorable_selection(range: SelectionRange, document_length: i64) -> Option<SelectionRange> {
    if range.from < 0 || range.to < range.from || range.to > document_length {
        return None;
    }
    Some(range)
}
