//! Email model produced by the decoder

use serde::{Deserialize, Serialize};

/// Sender name used when the `From` header is missing or unusable
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
/// Sender address used when no address can be recovered
pub const UNKNOWN_ADDRESS: &str = "unknown@unknown.com";
/// Subject used when the provider supplies none
pub const NO_SUBJECT: &str = "(No Subject)";

/// Unique identifier for a message (provider message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a conversation (provider thread ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A sender identity recovered from a free-form header value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name (e.g., "John Doe"), never empty
    pub name: String,
    /// Email address (e.g., "john@example.com"), never empty
    pub address: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Placeholder identity for messages without a usable sender
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_SENDER, UNKNOWN_ADDRESS)
    }
}

/// Canonical message record handed to UI and drafting callers
///
/// For listing decodes `body` holds the provider snippet, not the full
/// content. Only a full decode populates the real body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: MessageId,
    pub thread_id: ThreadId,
    /// Sender display name
    pub sender: String,
    /// Sender address
    pub sender_email: String,
    pub subject: String,
    /// Provider preview text
    pub snippet: String,
    pub body: String,
    /// Relative rendering of the provider timestamp (e.g., "3 hours ago")
    pub received_time: String,
    pub read: bool,
    /// RFC `Message-ID` header, when the provider returned it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id_header: Option<String>,
    /// RFC `References` header, when the provider returned it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references_header: Option<String>,
}
