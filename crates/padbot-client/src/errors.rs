use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("robot connection failed: {0}")]
    Connection(String),

    #[error("robot answered with http {code}")]
    Http { code: u16 },

    #[error("malformed robot response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    Request(String),
}

impl ClientError {
    /// Failures that say nothing about the remote action itself and may clear up on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Connection(_) | ClientError::Http { .. } | ClientError::MalformedResponse(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ClientError::Request(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Http {
                code: status.as_u16(),
            }
        } else if e.is_decode() {
            ClientError::MalformedResponse(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::MalformedResponse(e.to_string())
    }
}
