//! Transport abstraction for the mailbox REST API
//!
//! The client talks JSON to the provider through a [`Transport`], so tests
//! can swap the HTTP implementation for an in-memory fake.

mod fake;
mod http;

pub use fake::{FakeTransport, RecordedRequest};
pub use http::HttpTransport;

use serde_json::Value;

use crate::error::TransportError;

/// Query parameters; repeated keys are sent as repeated pairs
pub type Query<'a> = [(&'a str, String)];

/// Authenticated JSON request/response against the mailbox API
///
/// `path` is relative to the API base URL (e.g. `users/me/messages`).
/// Implementations must be shareable across threads so listings can fetch
/// message metadata in parallel.
pub trait Transport: Send + Sync {
    /// Issue a GET and return the parsed JSON body
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, TransportError>;

    /// Issue a POST with a JSON body and return the parsed JSON response
    fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}
