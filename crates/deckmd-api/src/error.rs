//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors
//! convert into `HttpAppError` so every failure renders the same way:
//! status from the error's metadata, JSON body with an `error` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deckmd_convert::ConvertError;
use deckmd_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from deckmd-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

impl From<ConvertError> for HttpAppError {
    fn from(err: ConvertError) -> Self {
        HttpAppError(AppError::Conversion(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}
