use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use padbot_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("operation not found: {0}")]
    OperationNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::OperationNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(e) => match e {
                CoreError::Rejected(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::Connection(_)
                | CoreError::Http(_)
                | CoreError::MalformedResponse(_)
                | CoreError::Timeout(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Core(e) => json!({ "error": self.to_string(), "kind": e.kind() }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_failures_are_bad_gateway() {
        assert_eq!(
            ApiError::from(CoreError::Http(500)).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(CoreError::Connection("refused".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn shut_down_controller_is_unavailable() {
        let err = ApiError::from(CoreError::Rejected("controller is shut down".into()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
