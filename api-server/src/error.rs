//! Error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use netra_core::EngineError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Engine errors
    #[error(transparent)]
    Engine(#[from] EngineError),

    // Request shape errors
    #[error("{0}")]
    BadRequest(String),

    // Optional component not configured
    #[error("{0}")]
    ServiceUnavailable(String),

    // Generic errors
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Engine(e) => match e {
                EngineError::SensorKeys { .. }
                | EngineError::SensorType { .. }
                | EngineError::SensorRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                EngineError::LocationNotFound(_) => StatusCode::NOT_FOUND,
                EngineError::EmptyHistory => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Engine(e) => e.kind(),
            AppError::BadRequest(_) => "bad_request",
            AppError::ServiceUnavailable(_) => "service_unavailable",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let range = AppError::from(EngineError::SensorRange {
            channel: "fume".to_string(),
            value: 150.0,
        });
        assert_eq!(range.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(range.kind(), "range_error");

        let missing = AppError::from(EngineError::LocationNotFound("Atlantis".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        assert_eq!(AppError::from(EngineError::EmptyHistory).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);

        let no_model = AppError::ServiceUnavailable("no model".into());
        assert_eq!(no_model.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(no_model.kind(), "service_unavailable");
        assert_eq!(
            AppError::from(EngineError::InvalidWeights { sum: 0.9 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
