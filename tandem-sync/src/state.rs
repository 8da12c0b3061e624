//! Per-document session state and the pure guards over it.

use std::collections::VecDeque;

use crate::error::SyncError;
use crate::protocol::is_newer_sequence;

/// Canonical form used wherever two Markdown strings are compared for
/// semantic equality: line endings are normalized and trailing whitespace is
/// stripped at the end only. Not for display.
pub fn canonicalize_markdown_for_sync(markdown: &str) -> String {
    markdown.replace("\r\n", "\n").trim_end().to_string()
}

/// Stale-message guard for editor updates.
pub fn should_accept_sequence(sequence: i64, last_sequence: i64) -> bool {
    is_newer_sequence(sequence, last_sequence)
}

/// Whether a document change must be pushed to the editor: always when no
/// baseline exists yet, otherwise only when the canonical forms differ.
pub fn should_post_external_set_content(
    document_markdown_canonical: &str,
    last_editor_markdown_canonical: Option<&str>,
) -> bool {
    match last_editor_markdown_canonical {
        None => true,
        Some(baseline) => document_markdown_canonical != baseline,
    }
}

/// Bounded FIFO of canonical Markdown strings for edits this engine is about
/// to apply to the document, used to recognize self-caused change
/// notifications. Enqueueing past capacity evicts oldest entries first;
/// consuming removes at most one matching occurrence.
#[derive(Debug, Clone)]
pub struct ExpectedEditQueue {
    entries: VecDeque<String>,
    max_size: usize,
}

impl ExpectedEditQueue {
    pub const DEFAULT_MAX_SIZE: usize = 20;

    pub fn new(max_size: usize) -> Result<Self, SyncError> {
        if max_size < 1 {
            return Err(SyncError::InvalidQueueBound(max_size));
        }
        Ok(ExpectedEditQueue {
            entries: VecDeque::new(),
            max_size,
        })
    }

    pub fn enqueue(&mut self, canonical: String) {
        self.entries.push_back(canonical);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Remove the first matching occurrence; reports whether a match existed.
    pub fn consume(&mut self, canonical: &str) -> bool {
        match self.entries.iter().position(|entry| entry == canonical) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Mutable session state for one open document.
#[derive(Debug)]
pub struct SyncState {
    /// Leading comment block extracted from the document, reattached on
    /// every Markdown emission.
    pub saved_comments: String,
    /// Set while a self-originated document edit is being applied.
    pub is_applying_editor_edit: bool,
    /// Canonicals of edits about to land in the document.
    pub expected_apply_canonicals: ExpectedEditQueue,
    /// Exact Markdown a save-triggered flush is about to write.
    pub expected_save_markdown: Option<String>,
    /// Canonical form of the Markdown last known to match editor content.
    pub last_editor_markdown_canonical: Option<String>,
    /// Latest editor HTML not yet flushed to the document; `None` means the
    /// document is current.
    pub pending_html: Option<String>,
    /// Last HTML known to be displayed in the editor.
    pub editor_html: String,
    /// Highest accepted editor-originated sequence.
    pub last_editor_sequence: i64,
    /// Last sequence this host sent to the editor.
    pub last_host_sequence: i64,
}

impl SyncState {
    pub fn new(expected_queue_max: usize) -> Result<Self, SyncError> {
        Ok(SyncState {
            saved_comments: String::new(),
            is_applying_editor_edit: false,
            expected_apply_canonicals: ExpectedEditQueue::new(expected_queue_max)?,
            expected_save_markdown: None,
            last_editor_markdown_canonical: None,
            pending_html: None,
            editor_html: String::new(),
            last_editor_sequence: 0,
            last_host_sequence: 0,
        })
    }

    pub fn next_host_sequence(&mut self) -> i64 {
        self.last_host_sequence += 1;
        self.last_host_sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalization_normalizes_line_endings_and_trailing_blank_noise() {
        assert_eq!(canonicalize_markdown_for_sync("A\r\nB\r\n"), "A\nB");
        assert_eq!(canonicalize_markdown_for_sync("A\nB\n\n"), "A\nB");
        assert_eq!(canonicalize_markdown_for_sync("A\nB"), "A\nB");
    }

    #[test]
    fn sequence_guard_accepts_only_newer() {
        assert!(should_accept_sequence(3, 2));
        assert!(!should_accept_sequence(2, 2));
        assert!(!should_accept_sequence(1, 2));
    }

    #[test]
    fn external_post_gate() {
        assert!(!should_post_external_set_content("A\nB", Some("A\nB")));
        assert!(should_post_external_set_content("A\nB", Some("A\nC")));
        assert!(should_post_external_set_content("A\nB", None));
    }

    #[test]
    fn queue_rejects_zero_capacity() {
        assert_eq!(
            ExpectedEditQueue::new(0).unwrap_err(),
            SyncError::InvalidQueueBound(0)
        );
    }

    #[test]
    fn enqueue_keeps_latest_when_over_capacity() {
        let mut queue = ExpectedEditQueue::new(2).unwrap();
        queue.enqueue("A".to_string());
        queue.enqueue("B".to_string());
        queue.enqueue("C".to_string());
        let entries: Vec<&str> = queue.entries().collect();
        assert_eq!(entries, ["B", "C"]);
    }

    #[test]
    fn eviction_is_fifo_at_default_capacity() {
        let mut queue = ExpectedEditQueue::new(ExpectedEditQueue::DEFAULT_MAX_SIZE).unwrap();
        for index in 0..25 {
            queue.enqueue(format!("edit-{index}"));
        }
        assert_eq!(queue.len(), 20);
        let entries: Vec<&str> = queue.entries().collect();
        assert_eq!(entries[0], "edit-5");
        assert_eq!(entries[19], "edit-24");
    }

    #[test]
    fn consume_removes_at_most_one_match() {
        let mut queue = ExpectedEditQueue::new(5).unwrap();
        queue.enqueue("A".to_string());
        queue.enqueue("B".to_string());
        queue.enqueue("A".to_string());
        assert!(queue.consume("A"));
        let entries: Vec<&str> = queue.entries().collect();
        assert_eq!(entries, ["B", "A"]);
    }

    #[test]
    fn consume_is_noop_without_match() {
        let mut queue = ExpectedEditQueue::new(5).unwrap();
        queue.enqueue("A".to_string());
        assert!(!queue.consume("C"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn host_sequence_is_monotonic() {
        let mut state = SyncState::new(20).unwrap();
        assert_eq!(state.next_host_sequence(), 1);
        assert_eq!(state.next_host_sequence(), 2);
    }
}
