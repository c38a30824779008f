//! Gmail message decoding
//!
//! Converts Gmail API messages to [`Email`] records. Decoding never fails:
//! missing headers, bodies, or timestamps resolve to documented placeholders.

use base64::prelude::*;
use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::api::{GmailMessage, MessagePart};
use super::html::html_to_text;
use super::identity::parse_identity;
use super::relative_time::relative_from_internal_date;
use crate::models::{Email, Identity, MessageId, NO_SUBJECT, ThreadId, labels};

/// Deepest MIME nesting the body walk will descend into
pub const MAX_PART_DEPTH: usize = 32;

const TEXT_PLAIN: &str = "text/plain";
const TEXT_HTML: &str = "text/html";

/// How much of a message to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeDepth {
    /// Listing view: headers and snippet only, body is the snippet
    Metadata,
    /// Opened message: walk the MIME tree for the real body
    Full,
}

/// Decode a Gmail message relative to the current time
pub fn decode_message(msg: &GmailMessage, depth: DecodeDepth) -> Email {
    decode_message_at(msg, depth, Utc::now())
}

/// Decode a Gmail message, rendering `received_time` relative to `now`
pub fn decode_message_at(msg: &GmailMessage, depth: DecodeDepth, now: DateTime<Utc>) -> Email {
    let payload = msg.payload.as_ref();
    let header = |name: &str| payload.and_then(|p| p.header(name));

    let sender = header("From")
        .map(parse_identity)
        .unwrap_or_else(Identity::unknown);

    let subject = header("Subject")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SUBJECT)
        .to_string();

    let body = match depth {
        DecodeDepth::Metadata => msg.snippet.clone(),
        DecodeDepth::Full => payload.map(extract_body).unwrap_or_default(),
    };

    // Unknown label state counts as unread
    let read = msg
        .label_ids
        .as_ref()
        .is_some_and(|ids| !ids.iter().any(|l| l == labels::UNREAD));

    Email {
        id: MessageId::new(&msg.id),
        thread_id: ThreadId::new(&msg.thread_id),
        sender: sender.name,
        sender_email: sender.address,
        subject,
        snippet: msg.snippet.clone(),
        body,
        received_time: relative_from_internal_date(msg.internal_date.as_deref(), now),
        read,
        message_id_header: header("Message-ID").map(|v| v.trim().to_string()),
        references_header: header("References").map(|v| v.trim().to_string()),
    }
}

/// Extract readable body text from a payload tree
///
/// Prefers `text/plain`, then `text/html` (reduced to text), then the first
/// nested part that yields content. Returns an empty string when nothing
/// decodable is found.
pub fn extract_body(payload: &MessagePart) -> String {
    walk_part(payload, 0)
}

fn walk_part(part: &MessagePart, depth: usize) -> String {
    if depth > MAX_PART_DEPTH {
        debug!("MIME tree exceeds {} levels, ignoring deeper parts", MAX_PART_DEPTH);
        return String::new();
    }

    let children = part.children();
    if !children.is_empty() {
        let preferred = find_child(children, TEXT_PLAIN).or_else(|| find_child(children, TEXT_HTML));
        if let Some(child) = preferred {
            return render_part(child);
        }

        for child in children {
            let text = walk_part(child, depth + 1);
            if !text.is_empty() {
                return text;
            }
        }
    }

    render_part(part)
}

/// First direct child of the given type that carries inline data
fn find_child<'a>(children: &'a [MessagePart], mime: &str) -> Option<&'a MessagePart> {
    children
        .iter()
        .find(|c| c.inline_data().is_some() && mime_essence(c) == mime)
}

/// Lowercased MIME type without parameters
fn mime_essence(part: &MessagePart) -> String {
    part.mime_type
        .as_deref()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn render_part(part: &MessagePart) -> String {
    let Some(data) = part.inline_data() else {
        return String::new();
    };

    let Some(bytes) = decode_base64_body(data) else {
        debug!("Undecodable body data in {} part", mime_essence(part));
        return String::new();
    };
    let text = String::from_utf8_lossy(&bytes);

    let text = if mime_essence(part) == TEXT_HTML {
        html_to_text(&text).unwrap_or_else(|| {
            warn!("Malformed HTML body, keeping markup");
            text.into_owned()
        })
    } else {
        text.into_owned()
    };

    normalize_text(&text)
}

/// Decode base64-encoded body data
///
/// Gmail uses URL-safe base64 but padding can vary, so we try multiple decoders.
fn decode_base64_body(data: &str) -> Option<Vec<u8>> {
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE};

    let decoders: &[&base64::engine::GeneralPurpose] =
        &[&BASE64_URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD, &STANDARD_NO_PAD];

    decoders.iter().find_map(|decoder| decoder.decode(data.trim()).ok())
}

/// Collapse CRLF/CR line endings to LF and trim surrounding whitespace
fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}
