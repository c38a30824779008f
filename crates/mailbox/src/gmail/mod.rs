//! Gmail API integration
//!
//! This module provides:
//! - Bearer token sources for the external sign-in flow
//! - Typed Gmail REST payloads
//! - An API client over a pluggable transport
//! - Decoding of provider messages into [`Email`](crate::models::Email)
//! - Encoding of replies into raw RFC 2822 messages

mod auth;
mod client;
mod decode;
mod encode;
mod html;
mod identity;
mod relative_time;

pub use auth::{StaticToken, StoredTokenFile, TOKEN_FILE, TokenSource};
pub use client::{GmailClient, MessageFormat, METADATA_HEADERS};
pub use decode::{DecodeDepth, MAX_PART_DEPTH, decode_message, decode_message_at, extract_body};
pub use encode::{EncodedMessage, encode_reply};
pub use identity::parse_identity;
pub use relative_time::{UNKNOWN_TIME, format_relative_time};

/// Gmail API payload types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Response from listing messages
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    /// Reference to a message (just ID and thread ID)
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: String,
        pub thread_id: String,
    }

    /// Message resource as returned by `messages.get`
    ///
    /// `payload` is absent for `format=minimal`; `label_ids` may be absent
    /// entirely, which is distinct from an empty list.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        #[serde(default)]
        pub thread_id: String,
        pub label_ids: Option<Vec<String>>,
        #[serde(default)]
        pub snippet: String,
        /// Milliseconds since epoch, encoded as a decimal string
        pub internal_date: Option<String>,
        pub payload: Option<MessagePart>,
    }

    /// A node of the MIME tree; the top-level payload is also a part
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePart {
        pub part_id: Option<String>,
        pub mime_type: Option<String>,
        pub filename: Option<String>,
        #[serde(default)]
        pub headers: Vec<Header>,
        pub body: Option<PartBody>,
        pub parts: Option<Vec<MessagePart>>,
    }

    impl MessagePart {
        /// Look up a header value by name, case-insensitively; first match wins
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        }

        /// Child parts, empty for leaf parts
        pub fn children(&self) -> &[MessagePart] {
            self.parts.as_deref().unwrap_or_default()
        }

        /// Inline base64url data carried by this part, if any
        pub fn inline_data(&self) -> Option<&str> {
            match &self.body {
                Some(PartBody::Inline { data, .. }) => Some(data),
                _ => None,
            }
        }
    }

    /// Email header (name-value pair)
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct Header {
        pub name: String,
        pub value: String,
    }

    /// Body of a part: either inline data or a placeholder
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(from = "RawPartBody")]
    pub enum PartBody {
        /// Content carried inline as base64url
        Inline { data: String, size: u64 },
        /// Content stored externally and fetched by attachment ID
        Attachment { attachment_id: String, size: u64 },
        /// Length-only placeholder with no retrievable content
        Empty { size: u64 },
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawPartBody {
        #[serde(default)]
        size: u64,
        data: Option<String>,
        attachment_id: Option<String>,
    }

    impl From<RawPartBody> for PartBody {
        fn from(raw: RawPartBody) -> Self {
            match (raw.data, raw.attachment_id) {
                (Some(data), _) if !data.is_empty() => Self::Inline {
                    data,
                    size: raw.size,
                },
                (_, Some(attachment_id)) => Self::Attachment {
                    attachment_id,
                    size: raw.size,
                },
                _ => Self::Empty { size: raw.size },
            }
        }
    }

    /// Body of `messages.modify`
    #[derive(Debug, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ModifyMessageRequest<'a> {
        #[serde(skip_serializing_if = "no_labels")]
        pub add_label_ids: &'a [&'a str],
        #[serde(skip_serializing_if = "no_labels")]
        pub remove_label_ids: &'a [&'a str],
    }

    fn no_labels(labels: &&[&str]) -> bool {
        labels.is_empty()
    }

    /// Body of `messages.send`
    #[derive(Debug, Serialize)]
    pub struct SendMessageRequest<'a> {
        pub raw: &'a str,
    }

    /// Response from `messages.send`
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendMessageResponse {
        pub id: String,
        #[serde(default)]
        pub thread_id: String,
        pub label_ids: Option<Vec<String>>,
    }

    /// Error envelope returned with non-success statuses
    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorDetail,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorDetail {
        pub code: Option<u16>,
        pub message: Option<String>,
        pub status: Option<String>,
    }

}
