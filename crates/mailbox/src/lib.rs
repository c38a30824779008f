//! Mailbox crate - transcoding layer between Gmail and the assistant
//!
//! This crate provides:
//! - Domain models (Email, ReplyRequest, MailboxView)
//! - Decoding of Gmail messages, including recursive MIME body selection
//! - Encoding of replies into raw RFC 2822 messages
//! - A Gmail API client over a pluggable transport
//! - Query API for listing views and opening messages
//! - Action handlers for mutations (mark read, send reply)
//!
//! Decoding and encoding are pure functions; the only I/O happens through
//! an explicitly constructed [`Transport`].

pub mod actions;
pub mod config;
pub mod error;
pub mod gmail;
pub mod models;
pub mod query;
pub mod transport;

pub use actions::ActionHandler;
pub use crate::config::ClientConfig;
pub use error::TransportError;
pub use gmail::{
    DecodeDepth, EncodedMessage, GmailClient, StaticToken, StoredTokenFile, TokenSource, decode_message,
    encode_reply, parse_identity,
};
pub use models::{Email, Identity, MailboxView, MessageId, ReplyRequest, SentReply, ThreadId};
pub use query::{get_message, list_messages};
pub use transport::{FakeTransport, HttpTransport, Transport};
