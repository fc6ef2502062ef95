//! # Session Commands
//!
//! Opening and closing play on a table.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  start_session  ┌──────────┐  finalize_session ┌───────┐ │
//! │  │  Table   │────────────────►│  Active  │──────────────────►│ Paid  │ │
//! │  │ available│                 │ (billing │                   │       │ │
//! │  │ /reserved│                 │  live)   │                   │       │ │
//! │  └──────────┘                 └──────────┘                   └───────┘ │
//! │                                    │                             │      │
//! │                              table occupied             payment at the  │
//! │                                                         head of the list│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use cuebook_core::{Checkout, PaymentMethod, Session};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;

/// Lists every session, active and finalized, in start order.
pub fn list_sessions(ledger: &LedgerState) -> Vec<Session> {
    debug!("list_sessions command");
    ledger.with_ledger(|l| l.sessions().to_vec())
}

/// Starts a session on a table for a walk-in customer.
///
/// ## Arguments
/// * `table_id` - Table to occupy
/// * `customer_name` - Who is playing
///
/// ## Returns
/// The new active session
pub fn start_session(
    ledger: &LedgerState,
    table_id: &str,
    customer_name: &str,
) -> Result<Session, ApiError> {
    start_session_at(ledger, table_id, customer_name, Utc::now())
}

pub fn start_session_at(
    ledger: &LedgerState,
    table_id: &str,
    customer_name: &str,
    now: DateTime<Utc>,
) -> Result<Session, ApiError> {
    debug!(table_id = %table_id, customer = %customer_name, "start_session command");

    let session = ledger.with_ledger_mut(|l| l.start_session(table_id, customer_name, now))?;

    info!(
        session_id = %session.id,
        table = session.table_number,
        customer = %session.customer_name,
        "Session started"
    );
    Ok(session)
}

/// Closes a session and takes payment.
///
/// ## User Workflow
/// ```text
/// Operator: finalize 7f3c… cash
///      │
///      ▼
/// ┌────────────────────────────────────────────────────────────────┐
/// │  1. Find the session, refuse if already closed                 │
/// │  2. Bill ceil(minutes) at the table's hourly rate              │
/// │  3. Close the session, release the table, record the payment   │
/// └────────────────────────────────────────────────────────────────┘
///      │
///      ▼
/// { session: {...amount_cents: 22500}, payment: {...} }
/// ```
pub fn finalize_session(
    ledger: &LedgerState,
    session_id: &str,
    method: PaymentMethod,
) -> Result<Checkout, ApiError> {
    finalize_session_at(ledger, session_id, method, Utc::now())
}

pub fn finalize_session_at(
    ledger: &LedgerState,
    session_id: &str,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> Result<Checkout, ApiError> {
    debug!(session_id = %session_id, method = %method, "finalize_session command");

    let checkout = ledger.with_ledger_mut(|l| l.finalize_session(session_id, method, now))?;

    info!(
        session_id = %checkout.session.id,
        table = checkout.session.table_number,
        minutes = ?checkout.session.duration_minutes,
        amount = checkout.payment.amount_cents,
        method = %method,
        "Session finalized"
    );
    Ok(checkout)
}
