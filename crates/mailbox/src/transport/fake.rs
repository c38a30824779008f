//! In-memory transport for tests and offline use
//!
//! Responses are registered per method and path. Every request is recorded
//! so callers can assert on what would have been sent.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{Query, Transport};
use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
enum FakeResponse {
    Json(Value),
    Status { status: u16, message: Option<String> },
    Network(String),
}

/// A request captured by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// All values sent for a query key, in order
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Transport answering from canned responses
///
/// Unregistered routes answer with a 404 status error.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), FakeResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET `path` with `body`
    pub fn on_get(&self, path: impl Into<String>, body: Value) -> &Self {
        self.route(Method::Get, path.into(), FakeResponse::Json(body))
    }

    /// Answer POST `path` with `body`
    pub fn on_post(&self, path: impl Into<String>, body: Value) -> &Self {
        self.route(Method::Post, path.into(), FakeResponse::Json(body))
    }

    /// Fail GET `path` with an HTTP status
    pub fn fail_get(&self, path: impl Into<String>, status: u16, message: Option<&str>) -> &Self {
        let response = FakeResponse::Status {
            status,
            message: message.map(str::to_string),
        };
        self.route(Method::Get, path.into(), response)
    }

    /// Fail POST `path` with an HTTP status
    pub fn fail_post(&self, path: impl Into<String>, status: u16, message: Option<&str>) -> &Self {
        let response = FakeResponse::Status {
            status,
            message: message.map(str::to_string),
        };
        self.route(Method::Post, path.into(), response)
    }

    /// Fail GET `path` as if the connection dropped
    pub fn disconnect_get(&self, path: impl Into<String>) -> &Self {
        self.route(Method::Get, path.into(), FakeResponse::Network("connection reset".to_string()))
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    fn route(&self, method: Method, path: String, response: FakeResponse) -> &Self {
        lock(&self.routes).insert((method, path), response);
        self
    }

    fn respond(&self, method: Method, path: &str) -> Result<Value, TransportError> {
        let response = lock(&self.routes).get(&(method, path.to_string())).cloned();
        match response {
            Some(FakeResponse::Json(body)) => Ok(body),
            Some(FakeResponse::Status { status, message }) => Err(TransportError::status(status, message)),
            Some(FakeResponse::Network(message)) => Err(TransportError::Network(message)),
            None => Err(TransportError::status(
                404,
                Some(format!("No fake response for {:?} {}", method, path)),
            )),
        }
    }
}

impl Transport for FakeTransport {
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            body: None,
        });
        self.respond(Method::Get, path)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        });
        self.respond(Method::Post, path)
    }
}

/// A poisoned lock only means another test thread panicked; keep the data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
