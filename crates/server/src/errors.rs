use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Handler error. Responds with the status code only; the detail goes to the log.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UnknownColor(_) | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) | ServiceError::Db(_) | ServiceError::Model(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, %status, "request failed");
        } else if status == StatusCode::BAD_REQUEST {
            warn!(error = %self.0, "request rejected");
        }
        status.into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("data setup failed: {0}")]
    Data(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::not_found("person"), StatusCode::NOT_FOUND),
            (ServiceError::UnknownColor("green".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Validation("comma".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Db("gone".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let resp = ApiError(err).into_response();
            assert_eq!(resp.status(), status);
        }
    }
}
