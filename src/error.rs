// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// All error responses share the flat body shape `{ "error": "<message>" }`
/// that the admin frontend expects.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError::PayloadTooLarge(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::uploads::validate::UploadError> for ApiError {
    fn from(err: crate::uploads::validate::UploadError) -> Self {
        use crate::uploads::validate::UploadError;
        match err {
            UploadError::NoFileProvided => ApiError::bad_request("No file uploaded"),
            UploadError::InvalidFileType { .. } => ApiError::bad_request(err.to_string()),
            UploadError::FileTooLarge { .. } => ApiError::payload_too_large(err.to_string()),
        }
    }
}

impl From<crate::uploads::storage::StorageError> for ApiError {
    fn from(err: crate::uploads::storage::StorageError) -> Self {
        // Log the real error; the client gets the message or a generic fallback
        tracing::error!("storage error: {}", err);
        let message = err.to_string();
        if message.is_empty() {
            ApiError::internal_server_error("Failed to store uploaded file")
        } else {
            ApiError::internal_server_error(message)
        }
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        tracing::error!("session store error: {}", err);
        ApiError::internal_server_error("Session error occurred")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_is_flat() {
        let err = ApiError::bad_request("No file uploaded");
        assert_eq!(err.to_json(), json!({ "error": "No file uploaded" }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::payload_too_large("x").status_code(), 413);
        assert_eq!(ApiError::internal_server_error("x").status_code(), 500);
    }

    #[test]
    fn test_upload_error_mapping() {
        use crate::uploads::validate::UploadError;
        let err: ApiError = UploadError::NoFileProvided.into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "No file uploaded");
    }
}
