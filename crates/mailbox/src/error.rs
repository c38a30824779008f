//! Transport error type

/// Failure talking to the mailbox provider
///
/// Never retried by this crate. Decode anomalies are not errors and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Non-success HTTP status; `message` is the provider's when it sent one
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection, TLS, or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("Invalid response from mailbox provider: {0}")]
    InvalidResponse(String),

    /// No usable bearer credential
    #[error("Credentials unavailable: {0}")]
    Credentials(String),
}

impl TransportError {
    /// Build a status error, preferring the provider's message
    pub fn status(status: u16, provider_message: Option<String>) -> Self {
        let message = provider_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        Self::Status { status, message }
    }

    /// HTTP status of the failed call, if the provider answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}
