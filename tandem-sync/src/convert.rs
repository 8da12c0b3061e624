//! Asynchronous conversion variants for document-I/O paths.
//!
//! Behaviorally identical to the synchronous pipeline in `tandem-convert`;
//! the work moves to the blocking pool so a large document cannot stall the
//! event loop, and awaiting the result is the suspension point that lets
//! newer editor events land mid-flush. Echo and clipboard paths, which
//! cannot await, call the synchronous variants directly.

use tandem_convert::ConvertError;

/// Convert GFM Markdown to editor HTML off the event loop.
pub async fn markdown_to_html_async(markdown: String) -> Result<String, ConvertError> {
    tokio::task::spawn_blocking(move || tandem_convert::markdown_to_html(&markdown))
        .await
        .map_err(|e| ConvertError::ParseError(format!("conversion task failed: {e}")))?
}

/// Convert editor HTML to GFM Markdown off the event loop.
pub async fn html_to_markdown_async(html: String) -> Result<String, ConvertError> {
    tokio::task::spawn_blocking(move || tandem_convert::html_to_markdown(&html))
        .await
        .map_err(|e| ConvertError::SerializationError(format!("conversion task failed: {e}")))?
}
