//! # Error Types
//!
//! Domain-specific error types for cuebook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cuebook-core errors (this file)                                       │
//! │  ├── CoreError        - Ledger command failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  console errors (app crate)                                            │
//! │  └── ApiError         - What the operator sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Console output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Found Is an Error
//! Every ledger command given an unknown id returns a `*NotFound` variant and
//! leaves state untouched. Callers that only want the old "silently ignore"
//! behavior can check [`CoreError::is_not_found`] and drop the error.

use thiserror::Error;

use crate::types::TableStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger command errors.
///
/// A command that returns any of these has not mutated the ledger.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// No table with this id.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// No session with this id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// No reservation with this id.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Session was already finalized.
    ///
    /// ## When This Occurs
    /// - `finalize_session` called twice for the same session
    /// - Operator double-clicks "Charge" in the view layer
    #[error("Session {0} is already finalized")]
    SessionNotActive(String),

    /// Table already has an active session.
    ///
    /// ## User Workflow
    /// ```text
    /// start_session(table 4, "Bob")
    ///      │
    ///      ▼
    /// Table 4 has active session for "Alice"
    ///      │
    ///      ▼
    /// TableOccupied { table_number: 4, session_id: "..." }
    ///      │
    ///      ▼
    /// Console shows: "Table 4 is occupied by session ..."
    /// ```
    #[error("Table {table_number} is occupied by session {session_id}")]
    TableOccupied {
        table_number: u32,
        session_id: String,
    },

    /// Table is under maintenance and cannot be played or booked.
    #[error("Table {table_number} is unavailable ({status})")]
    TableUnavailable {
        table_number: u32,
        status: TableStatus,
    },

    /// Booking overlaps an existing reservation on the same table.
    #[error("Table {table_number} is already booked by reservation {reservation_id}")]
    ReservationConflict {
        table_number: u32,
        reservation_id: String,
    },

    /// Requested status change is not a manual transition.
    ///
    /// `occupied` and `reserved` are only reached through sessions and
    /// reservations.
    #[error("Table {table_number} cannot change from {from} to {to}")]
    InvalidTransition {
        table_number: u32,
        from: TableStatus,
        to: TableStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for the "unknown id" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::TableNotFound(_)
                | CoreError::SessionNotFound(_)
                | CoreError::ReservationNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad time of day, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TableOccupied {
            table_number: 4,
            session_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Table 4 is occupied by session abc");

        let err = CoreError::InvalidTransition {
            table_number: 2,
            from: TableStatus::Available,
            to: TableStatus::Occupied,
        };
        assert_eq!(
            err.to_string(),
            "Table 2 cannot change from available to occupied"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(!core_err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        assert!(CoreError::TableNotFound("9".into()).is_not_found());
        assert!(CoreError::SessionNotFound("x".into()).is_not_found());
        assert!(CoreError::ReservationNotFound("r".into()).is_not_found());
        assert!(!CoreError::SessionNotActive("x".into()).is_not_found());
    }
}
