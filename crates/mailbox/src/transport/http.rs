//! HTTP transport backed by ureq
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use log::debug;
use serde_json::Value;
use ureq::Agent;
use ureq::http::Response;

use super::{Query, Transport};
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::gmail::TokenSource;
use crate::gmail::api::ErrorResponse;

/// Transport issuing bearer-authenticated requests to the Gmail REST API
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
    tokens: Box<dyn TokenSource>,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    pub fn new(config: &ClientConfig, tokens: impl TokenSource + 'static) -> Self {
        // Status handling happens in `read_json` so error bodies can be inspected
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens: Box::new(tokens),
        }
    }

    fn url(&self, path: &str, query: &Query<'_>) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn bearer(&self) -> Result<String, TransportError> {
        let token = self
            .tokens
            .access_token()
            .map_err(|e| TransportError::Credentials(format!("{:#}", e)))?;
        Ok(format!("Bearer {}", token))
    }

    fn read_json(mut response: Response<ureq::Body>) -> Result<Value, TransportError> {
        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            let provider_message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error.message);
            return Err(TransportError::status(status.as_u16(), provider_message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, TransportError> {
        let url = self.url(path, query);
        debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.bearer()?)
            .call()
            .map_err(request_error)?;

        Self::read_json(response)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path, &[]);
        debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.bearer()?)
            .send_json(body)
            .map_err(request_error)?;

        Self::read_json(response)
    }
}

fn request_error(e: ureq::Error) -> TransportError {
    match e {
        ureq::Error::StatusCode(status) => TransportError::status(status, None),
        other => TransportError::Network(other.to_string()),
    }
}
