//! # cuebook-core: Pure Business Logic for a Billiards Hall
//!
//! This crate is the **heart** of Cuebook. It owns the ledger of tables,
//! sessions, payments and reservations, and every rule about how they
//! change. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cuebook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                View layer (out of scope)                        │   │
//! │  │    Table grid ──► Session timer ──► Checkout ──► Charts         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cuebook-console commands                        │   │
//! │  │    start_session, finalize_session, create_reservation, ...     │   │
//! │  │    (captures `now`, serializes access with a Mutex)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cuebook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │  ledger  │ │ billing/reports  │  │   │
//! │  │   │  Table   │ │  Money   │ │  Ledger  │ │ elapsed, owed,   │  │   │
//! │  │   │  Session │ │          │ │ commands │ │ revenue rollups  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Table, Session, Payment, Reservation)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`billing`] - Elapsed-time pricing
//! - [`ledger`] - The state container and its commands
//! - [`reports`] - Revenue and occupancy rollups
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use cuebook_core::{Ledger, LedgerSnapshot, PaymentMethod, Table, TableKind, TableStatus};
//!
//! let mut ledger = Ledger::from_snapshot(LedgerSnapshot {
//!     tables: vec![Table {
//!         id: "1".to_string(),
//!         number: 1,
//!         kind: TableKind::Pool,
//!         status: TableStatus::Available,
//!         hourly_rate_cents: 15000,
//!     }],
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
//! let session = ledger.start_session("1", "Alice", t0).unwrap();
//! let checkout = ledger
//!     .finalize_session(&session.id, PaymentMethod::Cash, t0 + Duration::minutes(90))
//!     .unwrap();
//!
//! assert_eq!(checkout.payment.amount_cents, 22500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod ledger;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Checkout, Ledger, LedgerSnapshot};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Divisor for turning billed minutes into hours of play.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Longest customer name accepted on sessions, payments and reservations.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest reservation, in hours.
///
/// ## Business Reason
/// A booking longer than a full evening is almost always a typo
/// (e.g., 20 instead of 2).
pub const MAX_RESERVATION_HOURS: u32 = 12;
