use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::validation::ValidationErrors;

/// JSON error body: `{error, message?, violations?}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: Option<String>,
    pub violations: Option<ValidationErrors>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a ValidationErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: Some(message.into()), violations: None }
    }

    pub fn validation(errs: ValidationErrors) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: None, violations: Some(errs) }
    }

    /// Logs the cause and hides it from the client.
    fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let error = if self.violations.is_some() {
            "Validation Error"
        } else {
            self.status.canonical_reason().unwrap_or("Error")
        };
        let body = ErrorBody { error, message: self.message.as_deref(), violations: self.violations.as_ref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for JsonApiError {
    fn from(errs: ValidationErrors) -> Self {
        Self::validation(errs)
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rej: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rej.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rej: PathRejection) -> Self {
        Self::new(rej.status(), rej.body_text())
    }
}

impl From<ModelError> for JsonApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ModelError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ModelError::Db(_) => Self::internal(e),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => Self::validation(errs),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => {
                Self::internal(format_args!("service error {}: {}", e.code(), e))
            }
            ServiceError::Model(inner) => inner.into(),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(errs) => Self::validation(errs),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, e.to_string()),
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                Self::internal(format_args!("auth error {}: {}", e.code(), e))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
