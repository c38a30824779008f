//! Gmail API client
//!
//! Thin typed wrapper over a [`Transport`]: builds request paths and query
//! parameters and deserializes the provider's JSON. No retries.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::api::{
    GmailMessage, ListMessagesResponse, ModifyMessageRequest, SendMessageRequest, SendMessageResponse,
};
use crate::error::TransportError;
use crate::models::MessageId;
use crate::transport::Transport;

/// Headers requested for listing (metadata) fetches
pub const METADATA_HEADERS: &[&str] = &["From", "Subject", "Date"];

/// Projection requested from `messages.get`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// Full MIME tree with body data
    Full,
    /// Labels, snippet, and the [`METADATA_HEADERS`] subset
    Metadata,
}

impl MessageFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Metadata => "metadata",
        }
    }
}

/// Gmail API client for reading and submitting messages
#[derive(Clone)]
pub struct GmailClient {
    transport: Arc<dyn Transport>,
}

impl GmailClient {
    const MESSAGES: &'static str = "users/me/messages";

    /// Largest page the list endpoint accepts
    pub const MAX_PAGE_SIZE: usize = 500;

    /// Create a new Gmail client over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List one page of message IDs carrying all of `label_ids`
    ///
    /// # Arguments
    /// * `label_ids` - Labels every returned message must have
    /// * `max_results` - Page size, clamped to 1-500
    pub fn list_messages(
        &self,
        label_ids: &[&str],
        max_results: usize,
    ) -> Result<ListMessagesResponse, TransportError> {
        let mut query: Vec<(&str, String)> = label_ids
            .iter()
            .map(|label| ("labelIds", label.to_string()))
            .collect();
        query.push((
            "maxResults",
            max_results.clamp(1, Self::MAX_PAGE_SIZE).to_string(),
        ));

        parse(self.transport.get(Self::MESSAGES, &query)?)
    }

    /// Get a single message in the requested projection
    pub fn get_message(&self, id: &MessageId, format: MessageFormat) -> Result<GmailMessage, TransportError> {
        let mut query = vec![("format", format.as_str().to_string())];
        if format == MessageFormat::Metadata {
            query.extend(METADATA_HEADERS.iter().map(|h| ("metadataHeaders", h.to_string())));
        }

        parse(self.transport.get(&message_path(id), &query)?)
    }

    /// Add and remove labels on a single message
    pub fn modify_message(&self, id: &MessageId, add: &[&str], remove: &[&str]) -> Result<(), TransportError> {
        let body = ModifyMessageRequest {
            add_label_ids: add,
            remove_label_ids: remove,
        };
        self.transport
            .post(&format!("{}/modify", message_path(id)), &to_json(&body)?)?;
        Ok(())
    }

    /// Submit a base64url-encoded RFC 2822 message
    pub fn send_message(&self, raw: &str) -> Result<SendMessageResponse, TransportError> {
        let body = SendMessageRequest { raw };
        let path = format!("{}/send", Self::MESSAGES);
        parse(self.transport.post(&path, &to_json(&body)?)?)
    }
}

fn message_path(id: &MessageId) -> String {
    format!("{}/{}", GmailClient::MESSAGES, urlencoding::encode(id.as_str()))
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

fn to_json<T: Serialize>(body: &T) -> Result<Value, TransportError> {
    serde_json::to_value(body).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FakeTransport;
    use serde_json::json;

    fn client() -> (Arc<FakeTransport>, GmailClient) {
        let fake = Arc::new(FakeTransport::new());
        let client = GmailClient::new(fake.clone());
        (fake, client)
    }

    #[test]
    fn test_list_messages_query() {
        let (fake, client) = client();
        fake.on_get(
            "users/me/messages",
            json!({ "messages": [{ "id": "m1", "threadId": "t1" }], "resultSizeEstimate": 1 }),
        );

        let list = client.list_messages(&["INBOX", "UNREAD"], 10).unwrap();
        assert_eq!(list.messages.unwrap()[0].id, "m1");

        let req = &fake.requests()[0];
        assert_eq!(req.query_values("labelIds"), vec!["INBOX", "UNREAD"]);
        assert_eq!(req.query_values("maxResults"), vec!["10"]);
    }

    #[test]
    fn test_list_messages_clamps_page_size() {
        let (fake, client) = client();
        fake.on_get("users/me/messages", json!({}));

        client.list_messages(&["INBOX"], 0).unwrap();
        client.list_messages(&["INBOX"], 10_000).unwrap();

        let requests = fake.requests();
        assert_eq!(requests[0].query_values("maxResults"), vec!["1"]);
        assert_eq!(requests[1].query_values("maxResults"), vec!["500"]);
    }

    #[test]
    fn test_get_message_metadata_headers() {
        let (fake, client) = client();
        fake.on_get("users/me/messages/m1", json!({ "id": "m1", "threadId": "t1" }));

        client.get_message(&MessageId::new("m1"), MessageFormat::Metadata).unwrap();

        let req = &fake.requests()[0];
        assert_eq!(req.query_values("format"), vec!["metadata"]);
        assert_eq!(req.query_values("metadataHeaders"), vec!["From", "Subject", "Date"]);
    }

    #[test]
    fn test_get_message_full_has_no_header_subset() {
        let (fake, client) = client();
        fake.on_get("users/me/messages/m1", json!({ "id": "m1", "threadId": "t1" }));

        client.get_message(&MessageId::new("m1"), MessageFormat::Full).unwrap();

        let req = &fake.requests()[0];
        assert_eq!(req.query_values("format"), vec!["full"]);
        assert!(req.query_values("metadataHeaders").is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_invalid_response() {
        let (fake, client) = client();
        fake.on_get("users/me/messages/m1", json!({ "unexpected": true }));

        let err = client.get_message(&MessageId::new("m1"), MessageFormat::Full).unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[test]
    fn test_message_id_is_path_encoded() {
        let (fake, client) = client();
        let _ = client.get_message(&MessageId::new("a/b"), MessageFormat::Full);
        assert_eq!(fake.requests()[0].path, "users/me/messages/a%2Fb");
    }

    #[test]
    fn test_send_message_body() {
        let (fake, client) = client();
        fake.on_post(
            "users/me/messages/send",
            json!({ "id": "s1", "threadId": "t9", "labelIds": ["SENT"] }),
        );

        let sent = client.send_message("RnJvbTogbWU").unwrap();
        assert_eq!(sent.id, "s1");
        assert_eq!(sent.thread_id, "t9");
        assert_eq!(fake.requests()[0].body, Some(json!({ "raw": "RnJvbTogbWU" })));
    }
}
