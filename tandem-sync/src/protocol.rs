//! Typed, validated message contract between the two sync endpoints.
//!
//! Every inbound message is structurally validated against a closed set of
//! shapes before any field is trusted; malformed or partially-shaped messages
//! are rejected (ignored), never fatal. Sequence numbers must be positive
//! safe integers so they survive a JSON round trip unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest integer exactly representable in a JSON number.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Origin tag carried by content updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateSource {
    #[serde(rename = "WEBVIEW_EDIT")]
    EditorEdit,
    #[serde(rename = "EXTERNAL_DOC_CHANGE")]
    ExternalDocChange,
    #[serde(rename = "SAVE_FLUSH")]
    SaveFlush,
    #[serde(rename = "INITIAL_LOAD")]
    InitialLoad,
}

impl UpdateSource {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "WEBVIEW_EDIT" => Some(UpdateSource::EditorEdit),
            "EXTERNAL_DOC_CHANGE" => Some(UpdateSource::ExternalDocChange),
            "SAVE_FLUSH" => Some(UpdateSource::SaveFlush),
            "INITIAL_LOAD" => Some(UpdateSource::InitialLoad),
            _ => None,
        }
    }
}

/// Messages sent by the editor to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorToHostMessage {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "UPDATE")]
    Update {
        html: String,
        sequence: i64,
        source: UpdateSource,
    },
    #[serde(rename = "OPEN_LINK")]
    OpenLink { href: String },
    #[serde(rename = "REQUEST_LINK")]
    RequestLink {
        #[serde(rename = "selectedText")]
        selected_text: String,
        #[serde(rename = "currentHref")]
        current_href: String,
        #[serde(rename = "hasSelection")]
        has_selection: bool,
    },
}

/// Messages sent by the host to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostToEditorMessage {
    #[serde(rename = "SET_CONTENT")]
    SetContent {
        html: String,
        sequence: i64,
        source: UpdateSource,
    },
    #[serde(rename = "APPLY_LINK")]
    ApplyLink {
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

fn as_str(value: &Value, field: &str) -> Option<String> {
    value.get(field)?.as_str().map(str::to_string)
}

fn as_bool(value: &Value, field: &str) -> Option<bool> {
    value.get(field)?.as_bool()
}

/// A positive safe integer, or nothing. Floats and out-of-range numbers are
/// rejected.
fn as_positive_safe_integer(value: &Value, field: &str) -> Option<i64> {
    let number = value.get(field)?.as_i64()?;
    (number > 0 && number <= MAX_SAFE_INTEGER).then_some(number)
}

/// Validate and parse an inbound editor message. `None` means the message is
/// malformed and must be ignored.
pub fn parse_editor_message(value: &Value) -> Option<EditorToHostMessage> {
    if !value.is_object() {
        return None;
    }
    match value.get("type")?.as_str()? {
        "READY" => Some(EditorToHostMessage::Ready),
        "UPDATE" => {
            let html = as_str(value, "html")?;
            let sequence = as_positive_safe_integer(value, "sequence")?;
            let source = UpdateSource::from_tag(value.get("source")?.as_str()?)?;
            // editor updates carry exactly one source tag
            if source != UpdateSource::EditorEdit {
                return None;
            }
            Some(EditorToHostMessage::Update {
                html,
                sequence,
                source,
            })
        }
        "OPEN_LINK" => Some(EditorToHostMessage::OpenLink {
            href: as_str(value, "href")?,
        }),
        "REQUEST_LINK" => Some(EditorToHostMessage::RequestLink {
            selected_text: as_str(value, "selectedText")?,
            current_href: as_str(value, "currentHref")?,
            has_selection: as_bool(value, "hasSelection")?,
        }),
        _ => None,
    }
}

/// Validate and parse an inbound host message. `None` means the message is
/// malformed and must be ignored.
pub fn parse_host_message(value: &Value) -> Option<HostToEditorMessage> {
    if !value.is_object() {
        return None;
    }
    match value.get("type")?.as_str()? {
        "SET_CONTENT" => Some(HostToEditorMessage::SetContent {
            html: as_str(value, "html")?,
            sequence: as_positive_safe_integer(value, "sequence")?,
            source: UpdateSource::from_tag(value.get("source")?.as_str()?)?,
        }),
        "APPLY_LINK" => {
            let href = as_str(value, "href")?;
            let text = match value.get("text") {
                None | Some(Value::Null) => None,
                Some(Value::String(text)) => Some(text.clone()),
                Some(_) => return None,
            };
            Some(HostToEditorMessage::ApplyLink { href, text })
        }
        _ => None,
    }
}

/// A sequence is newer than a baseline iff both are safe integers within
/// their field rules and the candidate strictly exceeds the baseline.
pub fn is_newer_sequence(sequence: i64, last_sequence: i64) -> bool {
    sequence > 0
        && sequence <= MAX_SAFE_INTEGER
        && last_sequence >= 0
        && last_sequence <= MAX_SAFE_INTEGER
        && sequence > last_sequence
}
