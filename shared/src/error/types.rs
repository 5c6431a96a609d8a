//! Error type and error response body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// System errors are logged when turned into a response. Store failures
    /// are not: they were logged with their cause where they were converted.
    fn logged_on_response(&self) -> bool {
        self.code.category() == ErrorCategory::System && self.code != ErrorCode::DatabaseError
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn required_field(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Malformed storage identifier, e.g. `AppError::invalid_id("user")`
    /// yields "Invalid user ID format"
    pub fn invalid_id(resource: &str) -> Self {
        Self::with_message(
            ErrorCode::InvalidIdentifier,
            format!("Invalid {resource} ID format"),
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::TokenInvalid)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    pub fn identity_mismatch() -> Self {
        Self::new(ErrorCode::IdentityMismatch)
    }

    pub fn not_found(code: ErrorCode) -> Self {
        Self::new(code)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Database failure. The message is the public one; callers log the cause.
    pub fn database() -> Self {
        Self::new(ErrorCode::DatabaseError)
    }
}

/// Body of every error response
///
/// ```json
/// { "code": 6101, "message": "Menu item not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorBody::from(&self);

        if self.logged_on_response() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::MenuItemNotFound);
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
        assert_eq!(err.message, "Menu item not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_invalid_id_message() {
        let err = AppError::invalid_id("menu item");
        assert_eq!(err.code, ErrorCode::InvalidIdentifier);
        assert_eq!(err.message, "Invalid menu item ID format");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_required_field_detail() {
        let err = AppError::required_field("email");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "email is required");
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
    }

    #[test]
    fn test_auth_constructors_status() {
        assert_eq!(
            AppError::unauthorized().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::token_expired().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::admin_required().http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::identity_mismatch().http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_database_error_hides_cause() {
        let err = AppError::database();
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_serialize() {
        let err = AppError::invalid_id("cart");
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["code"], 6);
        assert_eq!(json["message"], "Invalid cart ID format");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::MenuItemNotFound, "No such dish");
        assert_eq!(format!("{}", err), "No such dish");
    }

    #[test]
    fn test_store_failure_not_logged_twice() {
        assert!(!AppError::database().logged_on_response());
        assert!(AppError::internal("signing failed").logged_on_response());
        assert!(!AppError::invalid_token().logged_on_response());
    }
}
