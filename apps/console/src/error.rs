//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cuebook                                │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  > finalize 7f3c… cash                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ──── CoreError::SessionNotFound ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Already closed? ─ CoreError::SessionNotActive ── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"code":"NOT_FOUND","message":"Session not found: 7f3c…"}             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger reports unknown ids as errors; this layer is where an
//! integrator decides to surface them. The console always does.

use cuebook_core::CoreError;
use serde::Serialize;

/// API error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CONFLICT",
///   "message": "Table 4 is occupied by session 1b2c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Table, session or reservation id not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Table is busy or the booking clashes
    Conflict,

    /// Request breaks a ledger rule (finalized session, bad transition)
    BusinessLogic,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts ledger errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TableNotFound(id) => ApiError::not_found("Table", &id),
            CoreError::SessionNotFound(id) => ApiError::not_found("Session", &id),
            CoreError::ReservationNotFound(id) => ApiError::not_found("Reservation", &id),
            e @ (CoreError::TableOccupied { .. } | CoreError::ReservationConflict { .. }) => {
                ApiError::new(ErrorCode::Conflict, e.to_string())
            }
            e @ (CoreError::SessionNotActive(_)
            | CoreError::TableUnavailable { .. }
            | CoreError::InvalidTransition { .. }) => {
                ApiError::new(ErrorCode::BusinessLogic, e.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use cuebook_core::{TableStatus, ValidationError};

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = CoreError::SessionNotFound("abc".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Session not found: abc");
    }

    #[test]
    fn test_conflict_and_business_mapping() {
        let err: ApiError = CoreError::TableOccupied {
            table_number: 4,
            session_id: "s".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = CoreError::TableUnavailable {
            table_number: 4,
            status: TableStatus::Maintenance,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, "Table 4 is unavailable (maintenance)");
    }

    #[test]
    fn test_validation_mapping() {
        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "phone".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "phone is required");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_string(&ApiError::not_found("Table", "9")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Table not found: 9"}"#);
    }
}
