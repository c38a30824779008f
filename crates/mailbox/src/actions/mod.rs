//! Email actions module
//!
//! Provides high-level handlers for mailbox mutations like marking
//! messages read and sending replies.

mod handler;

pub use handler::ActionHandler;
