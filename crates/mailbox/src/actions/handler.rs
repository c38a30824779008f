//! Action handler for email mutations
//!
//! Each action is a single provider call; there is no local state to
//! reconcile afterwards, and failures propagate to the caller.

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::gmail::{GmailClient, encode_reply};
use crate::models::{MessageId, ReplyRequest, SentReply, labels};

/// Handler for mailbox mutations: read state and replies
pub struct ActionHandler {
    gmail: Arc<GmailClient>,
}

impl ActionHandler {
    /// Create a new action handler
    pub fn new(gmail: Arc<GmailClient>) -> Self {
        Self { gmail }
    }

    /// Mark a message as read by removing its UNREAD label
    pub fn mark_read(&self, id: &MessageId) -> Result<()> {
        info!("Marking message {} as read", id.as_str());

        self.gmail
            .modify_message(id, &[], &[labels::UNREAD])
            .with_context(|| format!("Failed to mark message {} as read", id.as_str()))
    }

    /// Encode and submit a reply
    ///
    /// Returns the provider-assigned message and thread IDs.
    pub fn send_reply(&self, reply: &ReplyRequest) -> Result<SentReply> {
        let encoded = encode_reply(reply);
        info!(
            "Sending reply to {} ({} bytes{})",
            reply.to,
            encoded.rfc2822.len(),
            if reply.in_reply_to.is_some() { ", threaded" } else { "" }
        );

        let sent = self
            .gmail
            .send_message(&encoded.raw)
            .with_context(|| format!("Failed to send reply to {}", reply.to))?;

        info!("Sent message {} in thread {}", sent.id, sent.thread_id);
        Ok(SentReply {
            id: sent.id,
            thread_id: sent.thread_id,
        })
    }
}
