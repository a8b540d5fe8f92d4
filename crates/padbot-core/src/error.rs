use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use padbot_client::ClientError;
use padbot_model::{ErrorKind, OperationError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("robot connection failed: {0}")]
    Connection(String),

    #[error("robot answered with http {0}")]
    Http(u16),

    #[error("malformed robot response: {0}")]
    MalformedResponse(String),

    #[error("invalid robot request: {0}")]
    Request(String),

    #[error("no terminal state after {0:?}")]
    Timeout(Duration),

    #[error("action failed: {0}")]
    ActionFailed(String),

    #[error("map file not found: {}", .0.display())]
    MapFileNotFound(PathBuf),

    #[error("pipeline step '{step}' failed: {reason}")]
    PipelineStepFailed {
        step: String,
        critical: bool,
        reason: String,
    },

    #[error("invalid waypoint list: {0}")]
    InvalidWaypoints(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("operation rejected: {0}")]
    Rejected(String),

    #[error("cancelled")]
    Cancelled,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Connection(_) => ErrorKind::Connection,
            CoreError::Http(_) => ErrorKind::Http,
            CoreError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            CoreError::Request(_) => ErrorKind::Request,
            CoreError::Timeout(_) => ErrorKind::Timeout,
            CoreError::ActionFailed(_) => ErrorKind::ActionFailed,
            CoreError::MapFileNotFound(_) => ErrorKind::MapFileNotFound,
            CoreError::PipelineStepFailed { .. } => ErrorKind::PipelineStepFailed,
            CoreError::InvalidWaypoints(_) => ErrorKind::InvalidWaypoints,
            CoreError::Io(_) => ErrorKind::Io,
            CoreError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            CoreError::Rejected(_) => ErrorKind::Rejected,
            CoreError::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn to_operation_error(&self) -> OperationError {
        OperationError::new(self.kind(), self.to_string())
    }
}

impl From<ClientError> for CoreError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Connection(msg) => CoreError::Connection(msg),
            ClientError::Http { code } => CoreError::Http(code),
            ClientError::MalformedResponse(msg) => CoreError::MalformedResponse(msg),
            ClientError::Request(msg) => CoreError::Request(msg),
        }
    }
}
