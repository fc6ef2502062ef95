//! # Billing
//!
//! Elapsed-time pricing for sessions.
//!
//! Two roundings apply:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  While playing (live estimate)        At finalization (billed)          │
//! │  ─────────────────────────────        ───────────────────────────       │
//! │  elapsed_minutes = floor(Δ / 60s)     billed_minutes = ceil(Δ / 60s)    │
//! │  owed = ceil(elapsed/60 × rate)       amount = ceil(billed/60 × rate)   │
//! │                                                                         │
//! │  Recomputed on every read.            Stored on the session and copied  │
//! │  Never persisted.                     to the payment.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of stored state and `now`.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::Session;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Whole minutes elapsed between `start` and `now`, rounded down.
///
/// A clock that reads earlier than `start` yields zero.
pub fn elapsed_minutes(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    millis / MILLIS_PER_MINUTE
}

/// Minutes billed for a session that ran from `start` to `end`, rounded up.
///
/// Any started minute is charged: 90m01s bills as 91 minutes.
pub fn billed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE
}

/// Live amount owed for a session at `now`.
///
/// For a finalized session this is the stored amount, so a view that keeps
/// polling after checkout sees the figure that was charged. `None` when the
/// live charge overflows.
pub fn current_amount_owed(
    session: &Session,
    hourly_rate: Money,
    now: DateTime<Utc>,
) -> Option<Money> {
    if !session.active {
        return Some(session.amount().unwrap_or_default());
    }
    hourly_rate.charge_for_minutes(elapsed_minutes(session.start_time, now))
}
