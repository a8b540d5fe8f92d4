use serde::{Deserialize, Serialize};

/// Flat error classification handed to callers alongside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    Http,
    MalformedResponse,
    Timeout,
    ActionFailed,
    MapFileNotFound,
    PipelineStepFailed,
    InvalidWaypoints,
    Cancelled,
    Rejected,
    Io,
    Request,
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
