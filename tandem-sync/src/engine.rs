//! The per-document synchronization state machine.
//!
//! Event flow: the editor emits HTML on every change; accepted updates are
//! sequence-checked, stored as pending content and debounced into a
//! full-document replacement. Document changes from anywhere else are
//! converted back to HTML and pushed to the editor, unless they are
//! recognized as echoes of this engine's own writes.
//!
//! The host side of the boundary (document storage, message transport, link
//! UI) is abstracted behind [`SyncHost`]; one [`DocumentSync`] owns the
//! session state exclusively, so handlers never run concurrently for the
//! same document.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use tandem_convert::{extract_html_comments, restore_html_comments};

use crate::convert::{html_to_markdown_async, markdown_to_html_async};
use crate::debounce::{self, Debounce};
use crate::error::SyncError;
use crate::images::ImageRewriter;
use crate::links::{has_explicit_scheme, validate_link_href};
use crate::options::SyncOptions;
use crate::protocol::{parse_editor_message, EditorToHostMessage, HostToEditorMessage, UpdateSource};
use crate::state::{
    canonicalize_markdown_for_sync, should_accept_sequence, should_post_external_set_content,
    SyncState,
};

/// External events driving one synchronization session.
#[derive(Debug)]
pub enum SyncEvent {
    /// Raw message received from the editor; validated before use.
    EditorMessage(Value),
    /// The document changed by any means.
    DocumentDidChange,
    /// The document is about to be saved; the reply carries the Markdown the
    /// host must write as part of the save transaction, if a pending editor
    /// edit exists.
    WillSave {
        reply: oneshot::Sender<Option<String>>,
    },
    /// The document was (re)opened; the session starts over.
    DocumentOpened,
}

/// Host-side collaborators of a synchronization session.
pub trait SyncHost {
    /// Current full text of the document.
    fn document_text(&self) -> String;

    /// Replace the entire document text. Returns whether the edit applied.
    fn apply_document_edit(&mut self, markdown: String) -> impl std::future::Future<Output = bool>;

    /// Deliver a message to the editor.
    fn post_message(&mut self, message: HostToEditorMessage);

    /// Open an href with an explicit scheme outside the editor.
    fn open_external(&mut self, href: &str);

    /// Open a schemeless href relative to the document.
    fn open_relative(&mut self, href: &str);

    /// Prompt the user for a link target. `None` means cancelled.
    fn request_link_input(
        &mut self,
        current_href: &str,
    ) -> impl std::future::Future<Output = Option<String>>;
}

/// Synchronization state machine for one open document.
pub struct DocumentSync<H: SyncHost> {
    host: H,
    state: SyncState,
    debounce: Debounce,
    images: Option<ImageRewriter>,
    options: SyncOptions,
}

impl<H: SyncHost> DocumentSync<H> {
    pub fn new(host: H, options: SyncOptions) -> Result<Self, SyncError> {
        Ok(DocumentSync {
            host,
            state: SyncState::new(options.expected_edit_queue_max)?,
            debounce: Debounce::new(options.debounce),
            images: None,
            options,
        })
    }

    /// Attach an image-src rewriter applied at every conversion boundary.
    pub fn with_image_rewriter(mut self, rewriter: ImageRewriter) -> Self {
        self.images = Some(rewriter);
        self
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Drive the session from an event channel until it closes. The armed
    /// debounce deadline races the channel; only the most recent deadline
    /// can fire.
    pub async fn run(mut self, mut events: mpsc::Receiver<SyncEvent>) -> H {
        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
                _ = debounce::sleep_until_deadline(deadline), if deadline.is_some() => {
                    self.debounce.cancel();
                    self.flush_to_document().await;
                }
            }
        }
        self.host
    }

    pub async fn handle_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::EditorMessage(value) => self.handle_editor_message(&value).await,
            SyncEvent::DocumentDidChange => self.handle_did_change().await,
            SyncEvent::WillSave { reply } => {
                let edit = self.handle_will_save();
                let _ = reply.send(edit);
            }
            SyncEvent::DocumentOpened => self.reset_session(),
        }
    }

    /// Validate and dispatch a raw editor message; malformed messages are
    /// ignored.
    pub async fn handle_editor_message(&mut self, value: &Value) {
        let Some(message) = parse_editor_message(value) else {
            debug!("ignored malformed editor message");
            return;
        };
        match message {
            EditorToHostMessage::Ready => self.handle_ready().await,
            EditorToHostMessage::Update { html, sequence, .. } => {
                self.handle_update(html, sequence);
            }
            EditorToHostMessage::OpenLink { href } => self.open_link(&href),
            EditorToHostMessage::RequestLink {
                current_href,
                has_selection,
                ..
            } => self.request_link(&current_href, has_selection).await,
        }
    }

    async fn handle_ready(&mut self) {
        let text = self.host.document_text();
        let extracted = extract_html_comments(&text);
        self.state.saved_comments = extracted.comments;
        self.state.last_editor_markdown_canonical = Some(canonicalize_markdown_for_sync(&text));
        match markdown_to_html_async(extracted.body).await {
            Ok(html) => {
                let html = self.resolve_images(html);
                self.post_set_content(html, UpdateSource::InitialLoad);
            }
            Err(error) => warn!(%error, "initial conversion failed"),
        }
    }

    fn handle_update(&mut self, html: String, sequence: i64) {
        if !should_accept_sequence(sequence, self.state.last_editor_sequence) {
            debug!(
                sequence,
                last_sequence = self.state.last_editor_sequence,
                "ignored stale editor update"
            );
            return;
        }
        self.state.last_editor_sequence = sequence;
        self.state.pending_html = Some(html.clone());
        self.state.editor_html = html.clone();

        // best-effort canonical refresh; the asynchronous flush recomputes
        // before anything is written
        let restored = self.restore_images(html);
        match tandem_convert::html_to_markdown(&restored) {
            Ok(markdown) => {
                let markdown = restore_html_comments(&self.state.saved_comments, &markdown);
                self.state.last_editor_markdown_canonical =
                    Some(canonicalize_markdown_for_sync(&markdown));
            }
            Err(error) => {
                debug!(%error, "canonical refresh failed, keeping prior baseline");
            }
        }
        debug!(
            sequence,
            html_length = self.state.editor_html.len(),
            "accepted editor update"
        );
        self.debounce.arm();
    }

    /// Write the pending editor content into the document. No-op without
    /// pending content; aborts instead of racing when newer content arrives
    /// during the conversion.
    pub async fn flush_to_document(&mut self) {
        let Some(html) = self.state.pending_html.take() else {
            return;
        };
        let restored = self.restore_images(html);
        let markdown = match html_to_markdown_async(restored).await {
            Ok(markdown) => restore_html_comments(&self.state.saved_comments, &markdown),
            Err(error) => {
                warn!(%error, "flush conversion failed");
                return;
            }
        };
        let canonical = canonicalize_markdown_for_sync(&markdown);
        self.state.last_editor_markdown_canonical = Some(canonical.clone());
        debug!(
            markdown_length = markdown.len(),
            last_editor_sequence = self.state.last_editor_sequence,
            "flush converted"
        );

        // a newer update arrived during the conversion; let the next
        // debounce cycle handle it instead of writing stale content
        if self.state.pending_html.is_some() {
            return;
        }

        self.state.expected_apply_canonicals.enqueue(canonical);
        self.state.is_applying_editor_edit = true;
        let applied = self.host.apply_document_edit(markdown).await;
        self.state.is_applying_editor_edit = false;
        debug!(applied, "flush applied edit");
    }

    /// Save-triggered flush: converts synchronously as part of the save
    /// transaction and returns the Markdown the host must write. The
    /// resulting change notification is suppressed by exact-text match.
    pub fn handle_will_save(&mut self) -> Option<String> {
        let html = self.state.pending_html.take()?;
        self.debounce.cancel();

        let restored = self.restore_images(html);
        let markdown = match tandem_convert::html_to_markdown(&restored) {
            Ok(markdown) => restore_html_comments(&self.state.saved_comments, &markdown),
            Err(error) => {
                warn!(%error, "save-time conversion failed");
                return None;
            }
        };
        self.state.last_editor_markdown_canonical =
            Some(canonicalize_markdown_for_sync(&markdown));
        self.state.expected_save_markdown = Some(markdown.clone());
        Some(markdown)
    }

    pub async fn handle_did_change(&mut self) {
        let text = self.host.document_text();
        let canonical = canonicalize_markdown_for_sync(&text);

        // Consume matching canonicals even while we originate the edit;
        // stale queue entries would suppress legitimate pushes during undo
        if self.state.is_applying_editor_edit {
            self.state.expected_apply_canonicals.consume(&canonical);
            return;
        }

        // apply notifications can surface out of order after newer editor
        // updates; a queue match means this change is our own echo
        if self.state.expected_apply_canonicals.consume(&canonical) {
            debug!(
                canonical_length = canonical.len(),
                "skipped self-originated document change"
            );
            return;
        }

        // save-time flush echo matches on exact text
        if let Some(expected) = self.state.expected_save_markdown.take() {
            if text == expected {
                return;
            }
        }

        let extracted = extract_html_comments(&text);
        self.state.saved_comments = extracted.comments;
        if !should_post_external_set_content(
            &canonical,
            self.state.last_editor_markdown_canonical.as_deref(),
        ) {
            debug!(
                canonical_length = canonical.len(),
                "document change matches editor baseline"
            );
            return;
        }

        let html = match markdown_to_html_async(extracted.body).await {
            Ok(html) => self.resolve_images(html),
            Err(error) => {
                warn!(%error, "external change conversion failed");
                return;
            }
        };

        // the editor already shows this content (save-time edits, no-op
        // formatter changes); a redundant push would destroy its undo
        // history
        if html == self.state.editor_html {
            return;
        }

        self.state.last_editor_markdown_canonical = Some(canonical);
        self.state.pending_html = None;
        self.debounce.cancel();
        debug!(html_length = html.len(), "pushing external document change");
        self.post_set_content(html, UpdateSource::ExternalDocChange);
    }

    /// Start the session over for a freshly opened document.
    fn reset_session(&mut self) {
        if let Ok(fresh) = SyncState::new(self.options.expected_edit_queue_max) {
            self.state = fresh;
        }
        self.debounce.cancel();
    }

    fn post_set_content(&mut self, html: String, source: UpdateSource) {
        let sequence = self.state.next_host_sequence();
        self.state.editor_html = html.clone();
        debug!(sequence, ?source, html_length = html.len(), "posting content");
        self.host.post_message(HostToEditorMessage::SetContent {
            html,
            sequence,
            source,
        });
    }

    fn open_link(&mut self, href: &str) {
        if has_explicit_scheme(href) {
            self.host.open_external(href);
        } else {
            self.host.open_relative(href);
        }
    }

    async fn request_link(&mut self, current_href: &str, has_selection: bool) {
        let Some(href) = self.host.request_link_input(current_href).await else {
            return;
        };
        if href.is_empty() || validate_link_href(&href).is_some() {
            return;
        }
        let text = (!has_selection).then(|| href.clone());
        self.host
            .post_message(HostToEditorMessage::ApplyLink { href, text });
    }

    fn resolve_images(&self, html: String) -> String {
        match &self.images {
            Some(rewriter) => rewriter.resolve(&html),
            None => html,
        }
    }

    fn restore_images(&self, html: String) -> String {
        match &self.images {
            Some(rewriter) => rewriter.restore(&html),
            None => html,
        }
    }
}
