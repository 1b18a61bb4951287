//! Error responses for the REST API.
//!
//! Every failure leaves the API as `{ "code": ..., "message": ... }` with a
//! status derived from the application error.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::PipelineError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StorageError;

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound { code: ErrorCode, message: String },
    Conflict(String),
    Internal { code: ErrorCode, message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        let (code, message) = match self {
            ApiError::BadRequest(m) => ("BAD_REQUEST".to_string(), m.clone()),
            ApiError::Unauthorized(m) => ("UNAUTHORIZED".to_string(), m.clone()),
            ApiError::NotFound { code, message } => (code.to_string(), message.clone()),
            ApiError::Conflict(m) => ("CONFLICT".to_string(), m.clone()),
            ApiError::Internal { code, message } => (code.to_string(), message.clone()),
        };
        ErrorResponse { code, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { code, message } = &self {
            tracing::error!(%code, %message, "request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_not_found() => ApiError::NotFound {
                code,
                message: err.message,
            },
            ErrorCode::ValidationFailed => ApiError::BadRequest(err.message),
            ErrorCode::Unauthorized => ApiError::Unauthorized(err.message),
            ErrorCode::InvalidStateTransition => ApiError::Conflict(err.message),
            code => ApiError::Internal {
                code,
                message: err.message,
            },
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey { .. } | StorageError::TooLarge { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            other => DomainError::from(other).into(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NotFound(e) | PipelineError::Domain(e) => e.into(),
            PipelineError::InvalidInput(message) => ApiError::BadRequest(message),
            PipelineError::Storage(e) => e.into(),
        }
    }
}

/// Parses a path identifier, answering 400 when it is not a valid id.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;

    #[test]
    fn not_found_codes_map_to_404() {
        let err: ApiError = PipelineError::not_found(ErrorCode::JobNotFound, "gone").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body().code, "JOB_NOT_FOUND");
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let err: ApiError = PipelineError::invalid_input("bad dates").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().message, "bad dates");
    }

    #[test]
    fn validation_and_state_errors_map_to_client_statuses() {
        let validation: ApiError = DomainError::validation("name", "empty").into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let conflict: ApiError =
            DomainError::new(ErrorCode::InvalidStateTransition, "terminal").into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let err: ApiError = PipelineError::Storage(StorageError::io("disk full")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().code, "STORAGE_ERROR");

        let err: ApiError = DomainError::database("save", "down").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn oversized_upload_is_a_client_error() {
        let err: ApiError = StorageError::too_large(20, 10).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id::<ProjectId>("not-a-uuid", "project").is_err());
        let id = ProjectId::new();
        assert_eq!(parse_id::<ProjectId>(&id.to_string(), "project").unwrap(), id);
    }
}
