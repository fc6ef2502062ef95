//! # Validation Module
//!
//! Input validation for ledger commands.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View layer / console parser                                  │
//! │  ├── Required fields present                                           │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger command (THIS MODULE)                                 │
//! │  ├── Names, phones, HH:MM times, durations, amounts                    │
//! │  └── Runs before any state is touched                                  │
//! │                                                                         │
//! │  The ledger never trusts that layer 1 ran.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cuebook_core::validation::{validate_customer_name, validate_start_time};
//!
//! assert!(validate_customer_name("Alice").is_ok());
//! assert!(validate_start_time("19:30").is_ok());
//! assert!(validate_start_time("7:30pm").is_err());
//! ```

use chrono::NaiveTime;

use crate::error::ValidationError;
use crate::{MAX_NAME_LENGTH, MAX_RESERVATION_HOURS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LENGTH` characters
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Validates a contact phone number and returns it trimmed.
///
/// ## Rules
/// - Required
/// - 7 to 20 characters
/// - Digits plus `+ - ( )` and spaces; at least 7 digits
///
/// ## Example
/// ```rust
/// use cuebook_core::validation::validate_phone;
///
/// assert!(validate_phone("+57 300 123 4567").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    if phone.chars().filter(char::is_ascii_digit).count() < 7 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 7,
        });
    }

    Ok(phone.to_string())
}

/// Validates an entity id reference (any non-blank string).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Time Validators
// =============================================================================

/// Validates a reservation start time in 24-hour `HH:MM` form.
///
/// ## Rules
/// - Exactly five characters, zero padded (`09:05`, not `9:05`)
/// - 00:00 through 23:59
pub fn validate_start_time(time: &str) -> ValidationResult<NaiveTime> {
    let time = time.trim();

    if time.is_empty() {
        return Err(ValidationError::Required {
            field: "start_time".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "start_time".to_string(),
        reason: "expected HH:MM (24-hour)".to_string(),
    };

    if time.len() != 5 {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())
}

/// Validates a reservation length in whole hours.
pub fn validate_duration_hours(hours: u32) -> ValidationResult<()> {
    if hours == 0 || hours > MAX_RESERVATION_HOURS {
        return Err(ValidationError::OutOfRange {
            field: "duration_hours".to_string(),
            min: 1,
            max: MAX_RESERVATION_HOURS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a payment amount in the smallest currency unit.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a table's hourly rate.
///
/// ## Rules
/// - Must be non-negative; zero is allowed for house tables
pub fn validate_hourly_rate(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "hourly_rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
