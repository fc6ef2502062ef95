//! # Domain Types
//!
//! Core domain types used throughout Cuebook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │    Session      │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  table_id (FK)  │◄──│  session_id     │       │
//! │  │  number         │   │  start_time     │   │  method         │       │
//! │  │  kind           │   │  end_time?      │   │  amount_cents   │       │
//! │  │  status         │   │  amount_cents?  │   │  timestamp      │       │
//! │  │  hourly_rate    │   │  active         │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │          ▲                                                              │
//! │          │             ┌─────────────────┐   ┌─────────────────┐       │
//! │          └─────────────│  Reservation    │   │ PaymentMethod   │       │
//! │                        │  date, HH:MM    │   │  Cash           │       │
//! │                        │  duration_hours │   │  Card           │       │
//! │                        │  confirmed      │   │  Transfer       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Fields
//! Sessions, payments and reservations copy `table_number` and
//! `customer_name` at creation time, so history reads the same even if the
//! hall later renumbers its tables.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Table Kind
// =============================================================================

/// The game a table is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Pool,
    Snooker,
    /// Pocketless three-ball table.
    Carambola,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Pool => "pool",
            TableKind::Snooker => "snooker",
            TableKind::Carambola => "carambola",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Table Status
// =============================================================================

/// Occupancy status of a table.
///
/// ## State Machine
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │               create_reservation                                        │
/// │   ┌───────────┐ ─────────────────► ┌──────────┐                        │
/// │   │ Available │                    │ Reserved │                        │
/// │   └───────────┘ ◄───────────────── └──────────┘                        │
/// │     ▲   │  ▲     cancel (last one)      │                               │
/// │     │   │  │                            │ start_session                 │
/// │     │   │  │ finalize_session           ▼                               │
/// │     │   │  └──────────────────────  ┌──────────┐                        │
/// │     │   └─────────────────────────► │ Occupied │                        │
/// │     │          start_session        └──────────┘                        │
/// │     │                                                                   │
/// │     │ set_table_status (manual, no active session)                      │
/// │     ▼                                                                   │
/// │   ┌─────────────┐                                                       │
/// │   │ Maintenance │                                                       │
/// │   └─────────────┘                                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    /// Exactly one active session references the table.
    Occupied,
    /// At least one reservation references the table and nothing is playing.
    Reserved,
    /// Manually taken out of service.
    Maintenance,
}

impl TableStatus {
    pub const ALL: [TableStatus; 4] = [
        TableStatus::Available,
        TableStatus::Occupied,
        TableStatus::Reserved,
        TableStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Maintenance => "maintenance",
        }
    }

    /// Statuses an operator may set directly.
    pub fn is_manual(&self) -> bool {
        matches!(self, TableStatus::Available | TableStatus::Maintenance)
    }

    /// Whether a new session may start on a table in this status.
    pub fn accepts_session(&self) -> bool {
        matches!(self, TableStatus::Available | TableStatus::Reserved)
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: TableStatus::ALL.iter().map(|s| s.to_string()).collect(),
            })
    }
}

// =============================================================================
// Table
// =============================================================================

/// A billable table.
///
/// Identity is stable; `status` is only ever changed by `Ledger` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub id: String,

    /// Number painted on the table, shown to customers.
    pub number: u32,

    #[serde(rename = "type")]
    pub kind: TableKind,

    pub status: TableStatus,

    /// Price of one hour of play, in the smallest currency unit.
    pub hourly_rate_cents: i64,
}

impl Table {
    /// Returns the hourly rate as Money.
    #[inline]
    pub fn hourly_rate(&self) -> Money {
        Money::from_cents(self.hourly_rate_cents)
    }
}

// =============================================================================
// Session
// =============================================================================

/// A timed occupancy of one table by one customer.
///
/// ## Lifecycle
/// - Created active with only `start_time` set
/// - Finalized exactly once: `active = false` and the three end fields set
/// - Immutable afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: String,
    pub table_id: String,
    /// Table number at session start (frozen).
    pub table_number: u32,
    pub customer_name: String,
    #[ts(as = "String")]
    pub start_time: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub end_time: Option<DateTime<Utc>>,
    /// Billed minutes, rounded up.
    pub duration_minutes: Option<i64>,
    pub amount_cents: Option<i64>,
    pub active: bool,
}

impl Session {
    /// Returns the finalized amount as Money, if the session has ended.
    #[inline]
    pub fn amount(&self) -> Option<Money> {
        self.amount_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "method".to_string(),
                allowed: PaymentMethod::ALL.iter().map(|m| m.to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A recorded payment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: String,
    /// Session this payment settles. `None` for manual entries.
    pub session_id: Option<String>,
    pub table_number: u32,
    pub customer_name: String,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Input for a manually entered payment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPayment {
    pub session_id: Option<String>,
    pub table_number: u32,
    pub customer_name: String,
    pub amount_cents: i64,
    pub method: PaymentMethod,
}

// =============================================================================
// Reservation
// =============================================================================

/// A future hold on a table.
///
/// ## Lifecycle
/// created (unconfirmed) ──► confirmed ──► (removed on cancel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reservation {
    pub id: String,
    pub table_id: String,
    pub table_number: u32,
    pub customer_name: String,
    pub phone: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Time of day, `HH:MM`.
    pub start_time: String,
    pub duration_hours: u32,
    pub confirmed: bool,
}

/// Input for a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewReservation {
    pub table_id: String,
    pub customer_name: String,
    pub phone: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_hours: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
