//! # Reservation Commands
//!
//! ```text
//!   create_reservation ──► pending ──► confirm_reservation ──► confirmed
//!            │                │                                    │
//!            ▼                └──────── cancel_reservation ◄───────┘
//!     table reserved                          │
//!                                             ▼
//!                                  table back to resting status
//! ```

use cuebook_core::{NewReservation, Reservation};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;

/// Lists reservations in booking order.
pub fn list_reservations(ledger: &LedgerState) -> Vec<Reservation> {
    debug!("list_reservations command");
    ledger.with_ledger(|l| l.reservations().to_vec())
}

/// Books a table for a future slot.
pub fn create_reservation(
    ledger: &LedgerState,
    new: NewReservation,
) -> Result<Reservation, ApiError> {
    debug!(
        table_id = %new.table_id,
        date = %new.date,
        start = %new.start_time,
        hours = new.duration_hours,
        "create_reservation command"
    );

    let reservation = ledger.with_ledger_mut(|l| l.create_reservation(new))?;

    info!(
        reservation_id = %reservation.id,
        table = reservation.table_number,
        date = %reservation.date,
        start = %reservation.start_time,
        "Reservation created"
    );
    Ok(reservation)
}

pub fn confirm_reservation(
    ledger: &LedgerState,
    reservation_id: &str,
) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %reservation_id, "confirm_reservation command");

    let reservation = ledger.with_ledger_mut(|l| l.confirm_reservation(reservation_id))?;

    info!(reservation_id = %reservation.id, "Reservation confirmed");
    Ok(reservation)
}

/// Cancels a booking. Returns the removed reservation.
pub fn cancel_reservation(
    ledger: &LedgerState,
    reservation_id: &str,
) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %reservation_id, "cancel_reservation command");

    let reservation = ledger.with_ledger_mut(|l| l.cancel_reservation(reservation_id))?;

    info!(
        reservation_id = %reservation.id,
        table = reservation.table_number,
        "Reservation cancelled"
    );
    Ok(reservation)
}
