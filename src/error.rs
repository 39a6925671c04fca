//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid schema name: '{0}'")]
    InvalidSchema(String),
}

/// Failure reported by a [`crate::store::TutorialStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// `fallback` is reported when the store error has no message of its own.
    #[error("{source}")]
    Store {
        source: StoreError,
        fallback: &'static str,
    },
}

impl AppError {
    pub fn store(source: StoreError, fallback: &'static str) -> Self {
        AppError::Store { source, fallback }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Store { source, fallback } => {
                let msg = source.to_string();
                if msg.trim().is_empty() {
                    (*fallback).to_string()
                } else {
                    msg
                }
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }
        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_uses_fallback_when_message_is_empty() {
        let err = AppError::store(StoreError::Unavailable(String::new()), "Could not delete Tutorial");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Could not delete Tutorial");
    }

    #[test]
    fn store_error_prefers_underlying_message() {
        let err = AppError::store(StoreError::Unavailable("connection reset".into()), "fallback");
        assert_eq!(err.message(), "connection reset");
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }
}
