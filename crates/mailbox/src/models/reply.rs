//! Outgoing reply model

use serde::{Deserialize, Serialize};

use super::Email;

/// A plain-text reply to be encoded and submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    /// Destination address
    pub to: String,
    pub subject: String,
    /// Plain text body, may be empty
    pub body: String,
    /// `Message-ID` of the message being answered
    pub in_reply_to: Option<String>,
    /// Space-separated chain of ancestor message IDs
    pub references: Option<String>,
}

impl ReplyRequest {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            in_reply_to: None,
            references: None,
        }
    }

    pub fn in_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.in_reply_to = Some(message_id.into());
        self
    }

    pub fn references(mut self, references: impl Into<String>) -> Self {
        self.references = Some(references.into());
        self
    }

    /// Build a reply addressed to the sender of a decoded message
    ///
    /// Threading headers are only filled when the original carried a
    /// `Message-ID`.
    pub fn to_email(original: &Email, body: impl Into<String>) -> Self {
        let mut reply = Self::new(
            original.sender_email.clone(),
            reply_subject(&original.subject),
            body,
        );

        if let Some(message_id) = &original.message_id_header {
            let references = match &original.references_header {
                Some(prior) if !prior.trim().is_empty() => format!("{} {}", prior.trim(), message_id),
                _ => message_id.clone(),
            };
            reply = reply.in_reply_to(message_id.clone()).references(references);
        }

        reply
    }
}

/// Prefix a subject with "Re: " unless it already has one
pub fn reply_subject(subject: &str) -> String {
    let trimmed = subject.trim();
    let already_reply = trimmed
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("re:"));
    if already_reply {
        trimmed.to_string()
    } else {
        format!("Re: {}", trimmed)
    }
}

/// Identifiers assigned by the provider to a submitted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentReply {
    pub id: String,
    pub thread_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageId, ThreadId};

    fn make_email(message_id: Option<&str>, references: Option<&str>) -> Email {
        Email {
            id: MessageId::new("m1"),
            thread_id: ThreadId::new("t1"),
            sender: "Alice".to_string(),
            sender_email: "alice@example.com".to_string(),
            subject: "Lunch".to_string(),
            snippet: String::new(),
            body: String::new(),
            received_time: "Just now".to_string(),
            read: true,
            message_id_header: message_id.map(str::to_string),
            references_header: references.map(str::to_string),
        }
    }

    #[test]
    fn test_reply_subject_prefix() {
        assert_eq!(reply_subject("Lunch"), "Re: Lunch");
        assert_eq!(reply_subject("Re: Lunch"), "Re: Lunch");
        assert_eq!(reply_subject("RE: Lunch"), "RE: Lunch");
    }

    #[test]
    fn test_to_email_threads_reply() {
        let original = make_email(Some("<b@mail>"), Some("<a@mail>"));
        let reply = ReplyRequest::to_email(&original, "Sounds good");

        assert_eq!(reply.to, "alice@example.com");
        assert_eq!(reply.subject, "Re: Lunch");
        assert_eq!(reply.in_reply_to.as_deref(), Some("<b@mail>"));
        assert_eq!(reply.references.as_deref(), Some("<a@mail> <b@mail>"));
    }

    #[test]
    fn test_to_email_without_message_id_omits_threading() {
        let original = make_email(None, None);
        let reply = ReplyRequest::to_email(&original, "");

        assert_eq!(reply.in_reply_to, None);
        assert_eq!(reply.references, None);
        assert_eq!(reply.body, "");
    }
}
