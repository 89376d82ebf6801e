//! Explicit result type for login, registration and logout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::core::error::AppError;
use crate::shared::types::ErrorKind;

/// `{ "success": true, "data": T }` or `{ "success": false, "message", "kind" }`
#[derive(Debug)]
pub enum AuthOutcome<T> {
    Success(T),
    Failure {
        message: String,
        kind: ErrorKind,
        status: StatusCode,
    },
}

impl<T> AuthOutcome<T> {
    pub fn failure(err: AppError) -> Self {
        AuthOutcome::Failure {
            status: err.status_code(),
            kind: err.kind(),
            message: err.public_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            AuthOutcome::Success(data) => Some(data),
            AuthOutcome::Failure { .. } => None,
        }
    }
}

impl<T> From<Result<T, AppError>> for AuthOutcome<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => AuthOutcome::Success(data),
            Err(err) => AuthOutcome::failure(err),
        }
    }
}

impl<T: Serialize> Serialize for AuthOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AuthOutcome::Success(data) => {
                let mut state = serializer.serialize_struct("AuthOutcome", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            AuthOutcome::Failure { message, kind, .. } => {
                let mut state = serializer.serialize_struct("AuthOutcome", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("message", message)?;
                state.serialize_field("kind", kind)?;
                state.end()
            }
        }
    }
}

impl<T: Serialize> IntoResponse for AuthOutcome<T> {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthOutcome::Success(_) => StatusCode::OK,
            AuthOutcome::Failure { status, .. } => *status,
        };
        (status, Json(self)).into_response()
    }
}
