//! Domain models for the transcoding layer

mod email;
mod label;
mod reply;

pub use email::{Email, Identity, MessageId, NO_SUBJECT, ThreadId, UNKNOWN_ADDRESS, UNKNOWN_SENDER};
pub use label::{MailboxView, labels};
pub use reply::{ReplyRequest, SentReply, reply_subject};
