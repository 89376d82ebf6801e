use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::backend::BackendError;
use crate::modules::maps::MapsError;
use crate::shared::types::{ApiResponse, ErrorKind};

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Backend answered 2xx but flagged the request as unsuccessful
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl AppError {
    /// Coarse category clients branch on instead of parsing messages
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::Unauthorized(_) | AppError::Forbidden(_) => ErrorKind::Auth,
            AppError::Network(_) | AppError::ServiceUnavailable(_) => ErrorKind::Network,
            AppError::NotFound(_)
            | AppError::Conflict(_)
            | AppError::Internal(_)
            | AppError::Rejected(_)
            | AppError::ExternalServiceError(_) => ErrorKind::Server,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Network(_) | AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message safe to show to the end user
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Network(msg) => {
                tracing::error!("Network error: {}", msg);
                "Gagal terhubung ke server".to_string()
            }
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                msg.clone()
            }
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::Rejected(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Validation(msg) => AppError::Validation(msg),
            BackendError::Network(msg) => AppError::Network(msg),
            BackendError::Cancelled => {
                AppError::ServiceUnavailable("Request cancelled".to_string())
            }
            BackendError::Server { status, message } => match status {
                200..=299 => AppError::Rejected(message),
                401 => AppError::Unauthorized(message),
                403 => AppError::Forbidden(message),
                404 => AppError::NotFound(message),
                409 => AppError::Conflict(message),
                400..=499 => AppError::BadRequest(message),
                _ => AppError::ExternalServiceError(message),
            },
        }
    }
}

impl From<MapsError> for AppError {
    fn from(err: MapsError) -> Self {
        match err {
            MapsError::NotGoogleMaps | MapsError::NoCoordinates => {
                AppError::Validation(err.to_string())
            }
            MapsError::Resolve(msg) => AppError::ExternalServiceError(format!(
                "Gagal membuka tautan Google Maps: {}",
                msg
            )),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(crate::shared::validation::first_message(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();
        let message = self.public_message();
        let errors = match self {
            AppError::Validation(ref msg) => Some(vec![msg.clone()]),
            _ => None,
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors).with_kind(kind));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
