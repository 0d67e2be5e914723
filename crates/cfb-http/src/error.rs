//! Maps builder failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use cfb_core::errors::{ButtonError, Error, MessageError, ResponseError};

/// Handler error: a core error rendered as `{ "error": { code, message } }`.
#[derive(Debug)]
pub struct AppError(pub Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Button(_) | Error::Message(_) | Error::Response(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::Config(_) | Error::Io(_) | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.0 {
            Error::Button(e) => e.code(),
            Error::Message(e) => e.code(),
            Error::Response(e) => e.code(),
            Error::Config(_) | Error::Io(_) | Error::Json(_) => "internal_error",
        }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl From<ButtonError> for AppError {
    fn from(e: ButtonError) -> Self {
        Self(e.into())
    }
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        Self(e.into())
    }
}

impl From<ResponseError> for AppError {
    fn from(e: ResponseError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        if status.is_server_error() {
            tracing::error!(code, error = %self.0, "request failed");
        } else {
            tracing::warn!(code, error = %self.0, "rejected invalid response payload");
        }

        let body = json!({ "error": { "code": code, "message": self.0.to_string() } });
        (status, Json(body)).into_response()
    }
}
