//! Query API for UI consumption
//!
//! Provides read-only access to mailbox views and opened messages.

mod messages;

pub use messages::{get_message, list_messages};
