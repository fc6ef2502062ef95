//! # Commands Module
//!
//! Every operation the console exposes, as plain functions over the
//! console state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── tables.rs        ◄─── Table listing and manual status
//! ├── sessions.rs      ◄─── Start / finalize play sessions
//! ├── payments.rs      ◄─── Payment listing and manual entry
//! ├── reservations.rs  ◄─── Book / confirm / cancel
//! └── reports.rs       ◄─── Live billing and dashboard
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell line:  start 3 Alice                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::sessions::start_session(&ledger, "3", "Alice")               │
//! │         │                                                               │
//! │         │  now = Utc::now()   ◄── captured once per command             │
//! │         ▼                                                               │
//! │  ledger.with_ledger_mut(|l| l.start_session("3", "Alice", now))         │
//! │         │                                                               │
//! │         │ CoreError ──► ApiError                                        │
//! │         ▼                                                               │
//! │  Result<Session, ApiError>  ──► printed as JSON                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command has an `*_at` twin taking `now` explicitly; the plain form
//! reads the clock and delegates. Tests drive the `*_at` forms.

pub mod payments;
pub mod reports;
pub mod reservations;
pub mod sessions;
pub mod tables;
