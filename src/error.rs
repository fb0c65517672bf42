// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::database::DatabaseError;

/// Field name -> reason, ordered so responses are stable
pub type FieldErrors = BTreeMap<String, String>;

/// HTTP API error with a status code and a client-facing message
#[derive(Debug)]
pub enum ApiError {
    // 422 Unprocessable Entity
    Unprocessable {
        message: String,
        field_errors: FieldErrors,
    },

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unprocessable { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unprocessable { .. } => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
            "status": self.status_code().as_u16(),
        });

        if let ApiError::Unprocessable { field_errors, .. } = self {
            if !field_errors.is_empty() {
                body["field_errors"] = json!(field_errors);
            }
        }

        body
    }
}

impl ApiError {
    pub fn unprocessable(field_errors: FieldErrors) -> Self {
        ApiError::Unprocessable {
            message: "Invalid inputs passed, please check your data.".to_string(),
            field_errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn payload_too_large(limit_bytes: usize) -> Self {
        ApiError::PayloadTooLarge(format!("Request body exceeds the {} byte limit.", limit_bytes))
    }

    /// Log the store failure and hide it behind `message`
    pub fn database(err: DatabaseError, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %err, "{}", message);
        ApiError::InternalServerError(message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Central conversion: every handler error becomes a JSON body here
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self.message());
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self.message());
        }
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_field_errors() {
        let mut fields = FieldErrors::new();
        fields.insert("phone".to_string(), "must be at least 10 characters".to_string());

        let err = ApiError::unprocessable(fields);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = err.to_json();
        assert_eq!(body["status"], 422);
        assert_eq!(body["message"], "Invalid inputs passed, please check your data.");
        assert_eq!(body["field_errors"]["phone"], "must be at least 10 characters");
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = ApiError::database(
            DatabaseError::QueryError("relation \"teachers\" does not exist".to_string()),
            "Something went wrong, could not find a teacher.",
        );
        let body = err.to_json();
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "Something went wrong, could not find a teacher.");
        assert!(!body.to_string().contains("relation"));
    }

    #[test]
    fn payload_too_large_names_the_limit() {
        let err = ApiError::payload_too_large(256);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = err.to_json();
        assert_eq!(body["status"], 413);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["message"], "Request body exceeds the 256 byte limit.");
    }

    #[test]
    fn not_found_has_no_field_errors() {
        let body = ApiError::not_found("Could not find this route.").to_json();
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body.get("field_errors").is_none());
    }
}
