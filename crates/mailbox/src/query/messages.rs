//! Message listing and retrieval

use anyhow::{Context, Result};
use log::{debug, warn};
use rayon::prelude::*;

use crate::gmail::{DecodeDepth, GmailClient, MessageFormat, decode_message};
use crate::models::{Email, MailboxView, MessageId};

/// List one page of messages for a mailbox view
///
/// Each message is fetched with the metadata projection and decoded
/// shallowly, so `body` holds the snippet. Fetches run in parallel and the
/// listing order is preserved; any failed fetch fails the whole listing.
///
/// # Arguments
/// * `client` - Gmail API client
/// * `view` - Logical mailbox view
/// * `max_results` - Maximum number of messages to return (1-500)
pub fn list_messages(client: &GmailClient, view: MailboxView, max_results: usize) -> Result<Vec<Email>> {
    let list = client
        .list_messages(view.label_ids(), max_results)
        .with_context(|| format!("Failed to list {} messages", view.as_str()))?;

    let refs = list.messages.unwrap_or_default();
    debug!("Listed {} message refs for {}", refs.len(), view.as_str());

    refs.par_iter()
        .map(|msg_ref| -> Result<Email> {
            let id = MessageId::new(&msg_ref.id);
            let msg = client
                .get_message(&id, MessageFormat::Metadata)
                .with_context(|| format!("Failed to fetch message {}", id.as_str()))?;
            Ok(decode_message(&msg, DecodeDepth::Metadata))
        })
        .collect()
}

/// Get a single message with its full body
///
/// Returns `None` when the provider cannot be reached or does not return
/// the message, so callers can show a "message not found" state.
pub fn get_message(client: &GmailClient, id: &MessageId) -> Option<Email> {
    match client.get_message(id, MessageFormat::Full) {
        Ok(msg) => Some(decode_message(&msg, DecodeDepth::Full)),
        Err(e) => {
            warn!("Failed to fetch message {}: {}", id.as_str(), e);
            None
        }
    }
}
