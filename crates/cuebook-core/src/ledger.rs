//! # Ledger
//!
//! The state container for a billiards hall: tables, sessions, payments and
//! reservations, plus the commands that move them between states.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Commands                                   │
//! │                                                                         │
//! │  Command               Writes                    Table status           │
//! │  ───────               ──────                    ────────────           │
//! │  set_table_status      table                     available/maintenance  │
//! │  start_session         sessions.push             → occupied             │
//! │  finalize_session      session, payments[0]      → resting status       │
//! │  record_payment        payments[0]               (unchanged)            │
//! │  create_reservation    reservations.push         → reserved*            │
//! │  confirm_reservation   reservation.confirmed     (unchanged)            │
//! │  cancel_reservation    reservations.remove       → resting status       │
//! │                                                                         │
//! │  * unless a session is playing on it                                    │
//! │                                                                         │
//! │  Resting status = occupied if a session is active, else maintenance     │
//! │  if set manually, else reserved if any reservation, else available.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Every command validates and computes everything it needs before the
//! first write, and nothing after the first write can fail. A command that
//! returns `Err` has not touched the ledger.
//!
//! ## Time
//! The ledger never reads the clock. Commands that need time take `now`,
//! captured once by the caller, so duration and amount can't disagree.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::billing::{billed_minutes, current_amount_owed};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    NewPayment, NewReservation, Payment, PaymentMethod, Reservation, Session, Table, TableStatus,
};
use crate::validation::{
    validate_customer_name, validate_duration_hours, validate_hourly_rate, validate_id,
    validate_payment_amount, validate_phone, validate_start_time,
};

// =============================================================================
// Snapshot
// =============================================================================

/// The four collections, as seeded into or read out of a ledger.
///
/// Payments are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerSnapshot {
    pub tables: Vec<Table>,
    pub sessions: Vec<Session>,
    pub payments: Vec<Payment>,
    pub reservations: Vec<Reservation>,
}

/// Result of finalizing a session: the closed session and its payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Checkout {
    pub session: Session,
    pub payment: Payment,
}

// =============================================================================
// Ledger
// =============================================================================

/// Owner and sole mutator of hall state.
///
/// ## Invariants
/// - A table is `Occupied` iff exactly one active session references it
/// - A table is `Reserved` iff a reservation references it, no session is
///   active on it, and it isn't under maintenance
/// - A finalized session's amount equals `ceil(minutes / 60 × rate)` and
///   equals the amount of the payment created with it
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    tables: Vec<Table>,
    sessions: Vec<Session>,
    payments: Vec<Payment>,
    reservations: Vec<Reservation>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from seed data.
    ///
    /// Table statuses are recomputed from the seeded sessions and
    /// reservations, so a stale `occupied` with no active session comes back
    /// as `available`. Manual `maintenance` is kept.
    ///
    /// ## Errors
    /// - `Validation` for blank table ids or negative rates
    /// - `TableOccupied` if two active sessions reference one table
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> CoreResult<Self> {
        for table in &snapshot.tables {
            validate_id("table_id", &table.id)?;
            validate_hourly_rate(table.hourly_rate_cents)?;
        }

        let mut ledger = Ledger {
            tables: snapshot.tables,
            sessions: snapshot.sessions,
            payments: snapshot.payments,
            reservations: snapshot.reservations,
        };

        for table in &ledger.tables {
            let mut active = ledger
                .sessions
                .iter()
                .filter(|s| s.active && s.table_id == table.id);
            if let (Some(_), Some(second)) = (active.next(), active.next()) {
                return Err(CoreError::TableOccupied {
                    table_number: table.number,
                    session_id: second.id.clone(),
                });
            }
        }

        for idx in 0..ledger.tables.len() {
            ledger.reconcile_table(idx);
        }

        Ok(ledger)
    }

    /// Copies the current state out.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            tables: self.tables.clone(),
            sessions: self.sessions.clone(),
            payments: self.payments.clone(),
            reservations: self.reservations.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Payments, newest first.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }

    /// The session currently playing on a table, if any.
    pub fn active_session_for(&self, table_id: &str) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.active && s.table_id == table_id)
    }

    pub fn active_sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(|s| s.active)
    }

    pub fn reservations_for<'a>(
        &'a self,
        table_id: &'a str,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.reservations
            .iter()
            .filter(move |r| r.table_id == table_id)
    }

    /// Live amount owed on a session at `now`.
    ///
    /// Recomputed on every call; nothing is cached or stored. A charge too
    /// large to represent is a `Validation` error.
    pub fn amount_owed(&self, session_id: &str, now: DateTime<Utc>) -> CoreResult<Money> {
        let session = self
            .session(session_id)
            .ok_or_else(|| CoreError::SessionNotFound(session_id.to_string()))?;
        let table = self
            .table(&session.table_id)
            .ok_or_else(|| CoreError::TableNotFound(session.table_id.clone()))?;

        current_amount_owed(session, table.hourly_rate(), now).ok_or_else(amount_out_of_range)
    }

    // -------------------------------------------------------------------------
    // Table commands
    // -------------------------------------------------------------------------

    /// Manually sets a table's status.
    ///
    /// ## Rules
    /// - Only `Available` and `Maintenance` can be set by hand
    /// - A table with an active session can't be re-statused
    /// - `Available` on a table that still has reservations resolves to
    ///   `Reserved`
    pub fn set_table_status(&mut self, table_id: &str, status: TableStatus) -> CoreResult<Table> {
        let idx = self.table_index(table_id)?;
        let table = &self.tables[idx];

        if !status.is_manual() {
            return Err(CoreError::InvalidTransition {
                table_number: table.number,
                from: table.status,
                to: status,
            });
        }

        if let Some(session) = self.active_session_for(table_id) {
            return Err(CoreError::TableOccupied {
                table_number: table.number,
                session_id: session.id.clone(),
            });
        }

        self.tables[idx].status = status;
        if status == TableStatus::Available {
            self.reconcile_table(idx);
        }

        Ok(self.tables[idx].clone())
    }

    // -------------------------------------------------------------------------
    // Session commands
    // -------------------------------------------------------------------------

    /// Opens a session on a table and marks it occupied.
    ///
    /// ## User Workflow
    /// ```text
    /// Operator picks table 1, types "Alice"
    ///      │
    ///      ▼
    /// start_session("1", "Alice", now) ← THIS FUNCTION
    ///      │
    ///      ├── blank name?          → Validation
    ///      ├── unknown table?       → TableNotFound
    ///      ├── already playing?     → TableOccupied
    ///      ├── maintenance?         → TableUnavailable
    ///      │
    ///      └── OK → Session { active: true, start_time: now }
    ///               table 1 → occupied
    /// ```
    pub fn start_session(
        &mut self,
        table_id: &str,
        customer_name: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<Session> {
        let customer_name = validate_customer_name(customer_name)?;
        let idx = self.table_index(table_id)?;
        let table = &self.tables[idx];

        if let Some(active) = self.active_session_for(table_id) {
            return Err(CoreError::TableOccupied {
                table_number: table.number,
                session_id: active.id.clone(),
            });
        }

        if !table.status.accepts_session() {
            return Err(CoreError::TableUnavailable {
                table_number: table.number,
                status: table.status,
            });
        }

        let session = Session {
            id: new_id(),
            table_id: table.id.clone(),
            table_number: table.number,
            customer_name,
            start_time: now,
            end_time: None,
            duration_minutes: None,
            amount_cents: None,
            active: true,
        };

        self.sessions.push(session.clone());
        self.tables[idx].status = TableStatus::Occupied;

        Ok(session)
    }

    /// Closes an active session, prices it and records its payment.
    ///
    /// ## Computation
    /// ```text
    /// duration_minutes = ceil((now - start_time) / 1 min)
    /// amount           = ceil(duration_minutes / 60 × table.hourly_rate)
    /// ```
    ///
    /// The session, the table status and the new payment (inserted at the
    /// front of the payment list) change together or not at all.
    ///
    /// Checkout always records exactly one payment. A session closed within
    /// its first millisecond bills 0 minutes and records a payment of 0; the
    /// positive-amount rule applies only to `record_payment`.
    ///
    /// ## Errors
    /// - `SessionNotFound` for an unknown id
    /// - `SessionNotActive` if it was already finalized (so a repeated call
    ///   leaves state exactly as the first call left it)
    /// - `TableNotFound` if the session's table is gone and can't be priced
    /// - `Validation` if the amount overflows, before anything is written
    pub fn finalize_session(
        &mut self,
        session_id: &str,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> CoreResult<Checkout> {
        let session_idx = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| CoreError::SessionNotFound(session_id.to_string()))?;
        let session = &self.sessions[session_idx];

        if !session.active {
            return Err(CoreError::SessionNotActive(session.id.clone()));
        }

        let table_idx = self.table_index(&session.table_id)?;
        let minutes = billed_minutes(session.start_time, now);
        let amount = self.tables[table_idx]
            .hourly_rate()
            .charge_for_minutes(minutes)
            .ok_or_else(amount_out_of_range)?;

        let payment = Payment {
            id: new_id(),
            session_id: Some(session.id.clone()),
            table_number: session.table_number,
            customer_name: session.customer_name.clone(),
            amount_cents: amount.cents(),
            method,
            timestamp: now,
        };

        let session = &mut self.sessions[session_idx];
        session.active = false;
        session.end_time = Some(now);
        session.duration_minutes = Some(minutes);
        session.amount_cents = Some(amount.cents());
        let session = session.clone();

        self.reconcile_table(table_idx);
        self.payments.insert(0, payment.clone());

        Ok(Checkout { session, payment })
    }

    // -------------------------------------------------------------------------
    // Payment commands
    // -------------------------------------------------------------------------

    /// Records a payment entered by hand.
    ///
    /// The session reference is not checked; walk-in sales and corrections
    /// carry none. Like checkout payments, it goes to the front of the list.
    pub fn record_payment(&mut self, new: NewPayment, now: DateTime<Utc>) -> CoreResult<Payment> {
        let customer_name = validate_customer_name(&new.customer_name)?;
        validate_payment_amount(new.amount_cents)?;

        let payment = Payment {
            id: new_id(),
            session_id: new.session_id,
            table_number: new.table_number,
            customer_name,
            amount_cents: new.amount_cents,
            method: new.method,
            timestamp: now,
        };

        self.payments.insert(0, payment.clone());

        Ok(payment)
    }

    // -------------------------------------------------------------------------
    // Reservation commands
    // -------------------------------------------------------------------------

    /// Books a table.
    ///
    /// ## Rules
    /// - Customer, phone, `HH:MM` start and 1..=12 hours are required
    /// - Tables under maintenance can't be booked
    /// - Overlapping bookings on the same table are rejected
    /// - A booking must end on or before chrono's last representable date
    /// - The table becomes `Reserved`, unless a session is playing on it, in
    ///   which case it stays `Occupied` until checkout
    pub fn create_reservation(&mut self, new: NewReservation) -> CoreResult<Reservation> {
        let customer_name = validate_customer_name(&new.customer_name)?;
        let phone = validate_phone(&new.phone)?;
        let start_time = validate_start_time(&new.start_time)?;
        validate_duration_hours(new.duration_hours)?;

        let idx = self.table_index(&new.table_id)?;
        let table = &self.tables[idx];

        if table.status == TableStatus::Maintenance {
            return Err(CoreError::TableUnavailable {
                table_number: table.number,
                status: table.status,
            });
        }

        let window = booking_window(new.date.and_time(start_time), new.duration_hours)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "booking runs past the last supported date".to_string(),
            })?;
        if let Some(clash) = self
            .reservations_for(&table.id)
            .find(|r| reservation_window(r).is_some_and(|other| overlaps(window, other)))
        {
            return Err(CoreError::ReservationConflict {
                table_number: table.number,
                reservation_id: clash.id.clone(),
            });
        }

        let reservation = Reservation {
            id: new_id(),
            table_id: table.id.clone(),
            table_number: table.number,
            customer_name,
            phone,
            date: new.date,
            start_time: start_time.format("%H:%M").to_string(),
            duration_hours: new.duration_hours,
            confirmed: false,
        };

        self.reservations.push(reservation.clone());
        self.reconcile_table(idx);

        Ok(reservation)
    }

    /// Marks a reservation confirmed. Confirming twice is harmless.
    pub fn confirm_reservation(&mut self, reservation_id: &str) -> CoreResult<Reservation> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| CoreError::ReservationNotFound(reservation_id.to_string()))?;

        reservation.confirmed = true;

        Ok(reservation.clone())
    }

    /// Removes a reservation and puts its table back in its resting status.
    ///
    /// A table that is mid-session stays `Occupied`; one with other bookings
    /// stays `Reserved`.
    pub fn cancel_reservation(&mut self, reservation_id: &str) -> CoreResult<Reservation> {
        let idx = self
            .reservations
            .iter()
            .position(|r| r.id == reservation_id)
            .ok_or_else(|| CoreError::ReservationNotFound(reservation_id.to_string()))?;

        let reservation = self.reservations.remove(idx);

        if let Some(table_idx) = self
            .tables
            .iter()
            .position(|t| t.id == reservation.table_id)
        {
            self.reconcile_table(table_idx);
        }

        Ok(reservation)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn table_index(&self, table_id: &str) -> CoreResult<usize> {
        self.tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))
    }

    /// The status a table should have given the sessions and reservations
    /// that reference it.
    fn resting_status(&self, table: &Table) -> TableStatus {
        if self.active_session_for(&table.id).is_some() {
            TableStatus::Occupied
        } else if table.status == TableStatus::Maintenance {
            TableStatus::Maintenance
        } else if self.reservations_for(&table.id).next().is_some() {
            TableStatus::Reserved
        } else {
            TableStatus::Available
        }
    }

    fn reconcile_table(&mut self, idx: usize) {
        let status = self.resting_status(&self.tables[idx]);
        self.tables[idx].status = status;
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

type Window = (NaiveDateTime, NaiveDateTime);

/// `None` when the end falls past chrono's last date.
fn booking_window(start: NaiveDateTime, hours: u32) -> Option<Window> {
    let end = start.checked_add_signed(Duration::hours(i64::from(hours)))?;
    Some((start, end))
}

/// Window of a stored reservation. `None` only for a malformed seeded
/// booking, which then can't clash with anything.
fn reservation_window(reservation: &Reservation) -> Option<Window> {
    let start = validate_start_time(&reservation.start_time).ok()?;
    booking_window(reservation.date.and_time(start), reservation.duration_hours)
}

fn amount_out_of_range() -> CoreError {
    ValidationError::OutOfRange {
        field: "amount".to_string(),
        min: 0,
        max: i64::MAX,
    }
    .into()
}

fn overlaps(a: Window, b: Window) -> bool {
    a.0 < b.1 && b.0 < a.1
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TableKind;
    use chrono::{NaiveDate, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn table(id: &str, number: u32, rate: i64) -> Table {
        Table {
            id: id.to_string(),
            number,
            kind: TableKind::Pool,
            status: TableStatus::Available,
            hourly_rate_cents: rate,
        }
    }

    fn hall() -> Ledger {
        Ledger::from_snapshot(LedgerSnapshot {
            tables: vec![
                table("1", 1, 15000),
                table("2", 2, 12000),
                table("3", 3, 18000),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    fn booking(table_id: &str, start_time: &str, hours: u32) -> NewReservation {
        NewReservation {
            table_id: table_id.to_string(),
            customer_name: "Carol".to_string(),
            phone: "3001234567".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            start_time: start_time.to_string(),
            duration_hours: hours,
        }
    }

    fn status_of(ledger: &Ledger, table_id: &str) -> TableStatus {
        ledger.table(table_id).unwrap().status
    }

    #[test]
    fn test_ninety_minute_session_scenario() {
        let mut ledger = hall();

        let session = ledger.start_session("1", "Alice", t0()).unwrap();
        assert!(session.active);
        assert_eq!(session.table_number, 1);
        assert_eq!(status_of(&ledger, "1"), TableStatus::Occupied);

        let checkout = ledger
            .finalize_session(&session.id, PaymentMethod::Cash, t0() + Duration::minutes(90))
            .unwrap();

        assert!(!checkout.session.active);
        assert_eq!(checkout.session.duration_minutes, Some(90));
        assert_eq!(checkout.session.amount_cents, Some(22500));
        assert_eq!(checkout.payment.amount_cents, 22500);
        assert_eq!(checkout.payment.method, PaymentMethod::Cash);
        assert_eq!(checkout.payment.session_id.as_deref(), Some(session.id.as_str()));
        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);
        assert_eq!(ledger.payments().len(), 1);
        assert_eq!(ledger.session(&session.id), Some(&checkout.session));
    }

    #[test]
    fn test_second_session_on_occupied_table_is_rejected() {
        let mut ledger = hall();
        let first = ledger.start_session("1", "Alice", t0()).unwrap();

        let err = ledger
            .start_session("1", "Bob", t0() + Duration::minutes(5))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::TableOccupied {
                table_number: 1,
                session_id: first.id.clone(),
            }
        );
        assert_eq!(ledger.active_sessions().count(), 1);
        assert_eq!(ledger.active_session_for("1").unwrap().id, first.id);
    }

    #[test]
    fn test_finalize_twice_leaves_state_unchanged() {
        let mut ledger = hall();
        let session = ledger.start_session("2", "Alice", t0()).unwrap();
        ledger
            .finalize_session(&session.id, PaymentMethod::Card, t0() + Duration::minutes(30))
            .unwrap();
        let after_first = ledger.snapshot();

        let err = ledger
            .finalize_session(&session.id, PaymentMethod::Cash, t0() + Duration::minutes(60))
            .unwrap_err();

        assert_eq!(err, CoreError::SessionNotActive(session.id.clone()));
        assert_eq!(ledger.snapshot(), after_first);
    }

    #[test]
    fn test_payment_amount_matches_session_duration_and_rate() {
        let mut ledger = hall();
        let elapsed = [
            Duration::seconds(1),
            Duration::minutes(7) + Duration::seconds(13),
            Duration::minutes(59) + Duration::seconds(59),
            Duration::hours(3) + Duration::minutes(1),
        ];

        for (i, delta) in elapsed.into_iter().enumerate() {
            let start = t0() + Duration::hours(i as i64 * 5);
            let session = ledger.start_session("3", "Dana", start).unwrap();
            let checkout = ledger
                .finalize_session(&session.id, PaymentMethod::Transfer, start + delta)
                .unwrap();

            let minutes = checkout.session.duration_minutes.unwrap();
            let expected = Money::from_cents(18000).charge_for_minutes(minutes).unwrap();
            assert_eq!(checkout.payment.amount(), expected);
            assert_eq!(checkout.session.amount(), Some(expected));
        }
    }

    #[test]
    fn test_overflowing_charge_is_rejected() {
        let mut ledger = Ledger::from_snapshot(LedgerSnapshot {
            tables: vec![table("9", 9, i64::MAX)],
            ..Default::default()
        })
        .unwrap();
        let session = ledger.start_session("9", "Mallory", t0()).unwrap();
        let before = ledger.snapshot();

        let err = ledger
            .finalize_session(&session.id, PaymentMethod::Cash, t0() + Duration::minutes(120))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::Validation(ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: 0,
                max: i64::MAX,
            })
        );
        assert_eq!(ledger.snapshot(), before);
        assert!(ledger.session(&session.id).unwrap().active);
        assert_eq!(status_of(&ledger, "9"), TableStatus::Occupied);
        assert!(ledger.payments().is_empty());

        assert!(matches!(
            ledger.amount_owed(&session.id, t0() + Duration::minutes(120)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_instant_checkout_records_zero_payment() {
        let mut ledger = hall();
        let session = ledger.start_session("1", "Alice", t0()).unwrap();

        let checkout = ledger
            .finalize_session(&session.id, PaymentMethod::Cash, t0())
            .unwrap();

        assert_eq!(checkout.session.duration_minutes, Some(0));
        assert_eq!(checkout.session.amount_cents, Some(0));
        assert_eq!(checkout.payment.amount_cents, 0);
        assert_eq!(ledger.payments().len(), 1);
        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);

        // A hand-entered payment of 0 is still refused.
        let err = ledger
            .record_payment(
                NewPayment {
                    session_id: None,
                    table_number: 1,
                    customer_name: "Alice".to_string(),
                    amount_cents: 0,
                    method: PaymentMethod::Cash,
                },
                t0(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(ledger.payments().len(), 1);
    }

    #[test]
    fn test_partial_minute_is_billed() {
        let mut ledger = hall();
        let session = ledger.start_session("1", "Alice", t0()).unwrap();

        let checkout = ledger
            .finalize_session(
                &session.id,
                PaymentMethod::Cash,
                t0() + Duration::minutes(90) + Duration::seconds(1),
            )
            .unwrap();

        assert_eq!(checkout.session.duration_minutes, Some(91));
        assert_eq!(checkout.payment.amount_cents, 22750);
    }

    #[test]
    fn test_reserve_then_cancel_scenario() {
        let mut ledger = hall();

        let reservation = ledger.create_reservation(booking("2", "19:30", 2)).unwrap();
        assert_eq!(status_of(&ledger, "2"), TableStatus::Reserved);
        assert!(!reservation.confirmed);
        assert_eq!(reservation.table_number, 2);

        let cancelled = ledger.cancel_reservation(&reservation.id).unwrap();
        assert_eq!(cancelled.id, reservation.id);
        assert_eq!(status_of(&ledger, "2"), TableStatus::Available);
        assert!(ledger.reservations().is_empty());
    }

    #[test]
    fn test_confirm_unknown_reservation_changes_nothing() {
        let mut ledger = hall();
        ledger.create_reservation(booking("2", "19:30", 2)).unwrap();
        let before = ledger.snapshot();

        let err = ledger.confirm_reservation("missing").unwrap_err();

        assert_eq!(err, CoreError::ReservationNotFound("missing".to_string()));
        assert!(err.is_not_found());
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut ledger = hall();
        let reservation = ledger.create_reservation(booking("2", "19:30", 2)).unwrap();

        let once = ledger.confirm_reservation(&reservation.id).unwrap();
        let twice = ledger.confirm_reservation(&reservation.id).unwrap();

        assert!(once.confirmed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_ids_are_reported_and_change_nothing() {
        let mut ledger = hall();
        let before = ledger.snapshot();

        assert_eq!(
            ledger.start_session("9", "Alice", t0()).unwrap_err(),
            CoreError::TableNotFound("9".to_string())
        );
        assert_eq!(
            ledger
                .finalize_session("nope", PaymentMethod::Cash, t0())
                .unwrap_err(),
            CoreError::SessionNotFound("nope".to_string())
        );
        assert_eq!(
            ledger
                .set_table_status("9", TableStatus::Maintenance)
                .unwrap_err(),
            CoreError::TableNotFound("9".to_string())
        );
        assert!(ledger.create_reservation(booking("9", "19:30", 1)).is_err());
        assert!(ledger.cancel_reservation("nope").unwrap_err().is_not_found());

        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_blank_customer_name_is_rejected() {
        let mut ledger = hall();
        let err = ledger.start_session("1", "   ", t0()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(ledger.sessions().is_empty());
        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);
    }

    #[test]
    fn test_maintenance_blocks_play_and_booking() {
        let mut ledger = hall();
        let table = ledger
            .set_table_status("3", TableStatus::Maintenance)
            .unwrap();
        assert_eq!(table.status, TableStatus::Maintenance);

        assert_eq!(
            ledger.start_session("3", "Alice", t0()).unwrap_err(),
            CoreError::TableUnavailable {
                table_number: 3,
                status: TableStatus::Maintenance,
            }
        );
        assert!(matches!(
            ledger.create_reservation(booking("3", "20:00", 1)),
            Err(CoreError::TableUnavailable { .. })
        ));

        let table = ledger.set_table_status("3", TableStatus::Available).unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert!(ledger.start_session("3", "Alice", t0()).is_ok());
    }

    #[test]
    fn test_derived_statuses_cannot_be_set_by_hand() {
        let mut ledger = hall();

        for status in [TableStatus::Occupied, TableStatus::Reserved] {
            assert_eq!(
                ledger.set_table_status("1", status).unwrap_err(),
                CoreError::InvalidTransition {
                    table_number: 1,
                    from: TableStatus::Available,
                    to: status,
                }
            );
        }
        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);
    }

    #[test]
    fn test_status_override_refused_during_session() {
        let mut ledger = hall();
        let session = ledger.start_session("1", "Alice", t0()).unwrap();

        let err = ledger
            .set_table_status("1", TableStatus::Maintenance)
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::TableOccupied {
                table_number: 1,
                session_id: session.id,
            }
        );
        assert_eq!(status_of(&ledger, "1"), TableStatus::Occupied);
    }

    #[test]
    fn test_setting_available_keeps_reservations_visible() {
        let mut ledger = hall();
        ledger.create_reservation(booking("2", "19:30", 2)).unwrap();
        ledger.set_table_status("2", TableStatus::Maintenance).unwrap();

        let table = ledger.set_table_status("2", TableStatus::Available).unwrap();

        assert_eq!(table.status, TableStatus::Reserved);
    }

    #[test]
    fn test_reservation_on_occupied_table_keeps_it_occupied() {
        let mut ledger = hall();
        let session = ledger.start_session("1", "Alice", t0()).unwrap();

        let reservation = ledger.create_reservation(booking("1", "21:00", 1)).unwrap();
        assert_eq!(status_of(&ledger, "1"), TableStatus::Occupied);

        ledger
            .finalize_session(&session.id, PaymentMethod::Cash, t0() + Duration::minutes(60))
            .unwrap();
        assert_eq!(status_of(&ledger, "1"), TableStatus::Reserved);

        ledger.cancel_reservation(&reservation.id).unwrap();
        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);
    }

    #[test]
    fn test_cancel_during_session_keeps_table_occupied() {
        let mut ledger = hall();
        let reservation = ledger.create_reservation(booking("2", "19:30", 2)).unwrap();
        ledger.start_session("2", "Walk-in", t0()).unwrap();

        ledger.cancel_reservation(&reservation.id).unwrap();

        assert_eq!(status_of(&ledger, "2"), TableStatus::Occupied);
    }

    #[test]
    fn test_cancel_one_of_two_reservations_stays_reserved() {
        let mut ledger = hall();
        let early = ledger.create_reservation(booking("2", "17:00", 2)).unwrap();
        ledger.create_reservation(booking("2", "20:00", 2)).unwrap();

        ledger.cancel_reservation(&early.id).unwrap();

        assert_eq!(status_of(&ledger, "2"), TableStatus::Reserved);
        assert_eq!(ledger.reservations_for("2").count(), 1);
    }

    #[test]
    fn test_session_may_start_on_reserved_table() {
        let mut ledger = hall();
        ledger.create_reservation(booking("2", "19:30", 2)).unwrap();

        ledger.start_session("2", "Carol", t0()).unwrap();

        assert_eq!(status_of(&ledger, "2"), TableStatus::Occupied);
    }

    #[test]
    fn test_overlapping_reservations_conflict() {
        let mut ledger = hall();
        let first = ledger.create_reservation(booking("2", "19:00", 2)).unwrap();

        assert_eq!(
            ledger
                .create_reservation(booking("2", "20:30", 1))
                .unwrap_err(),
            CoreError::ReservationConflict {
                table_number: 2,
                reservation_id: first.id,
            }
        );

        // back-to-back and other tables are fine
        assert!(ledger.create_reservation(booking("2", "21:00", 1)).is_ok());
        assert!(ledger.create_reservation(booking("1", "19:00", 2)).is_ok());
    }

    #[test]
    fn test_reservation_fields_are_validated() {
        let mut ledger = hall();

        let mut bad_phone = booking("2", "19:30", 2);
        bad_phone.phone = String::new();
        assert!(matches!(
            ledger.create_reservation(bad_phone),
            Err(CoreError::Validation(_))
        ));

        assert!(ledger.create_reservation(booking("2", "7pm", 2)).is_err());
        assert!(ledger.create_reservation(booking("2", "19:30", 0)).is_err());
        assert!(ledger.reservations().is_empty());
        assert_eq!(status_of(&ledger, "2"), TableStatus::Available);
    }

    #[test]
    fn test_booking_past_last_date_is_rejected() {
        let mut ledger = hall();
        let mut late = booking("2", "23:00", 2);
        late.date = NaiveDate::MAX;

        let err = ledger.create_reservation(late).unwrap_err();

        assert_eq!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "booking runs past the last supported date".to_string(),
            })
        );
        assert!(ledger.reservations().is_empty());
        assert_eq!(status_of(&ledger, "2"), TableStatus::Available);

        // Ending right at the edge is still bookable.
        let mut edge = booking("2", "21:00", 2);
        edge.date = NaiveDate::MAX;
        assert!(ledger.create_reservation(edge).is_ok());
    }

    #[test]
    fn test_seeded_booking_past_last_date_never_clashes() {
        let mut ledger = Ledger::from_snapshot(LedgerSnapshot {
            tables: vec![table("2", 2, 12000)],
            reservations: vec![Reservation {
                id: "r-far".to_string(),
                table_id: "2".to_string(),
                table_number: 2,
                customer_name: "Carol".to_string(),
                phone: "3001234567".to_string(),
                date: NaiveDate::MAX,
                start_time: "23:00".to_string(),
                duration_hours: 2,
                confirmed: false,
            }],
            ..Default::default()
        })
        .unwrap();

        let mut same_day = booking("2", "19:00", 2);
        same_day.date = NaiveDate::MAX;
        assert!(ledger.create_reservation(same_day).is_ok());
        assert_eq!(ledger.reservations().len(), 2);
    }

    #[test]
    fn test_payments_are_newest_first() {
        let mut ledger = hall();
        let s1 = ledger.start_session("1", "Alice", t0()).unwrap();
        let s2 = ledger.start_session("2", "Bob", t0()).unwrap();

        ledger
            .finalize_session(&s1.id, PaymentMethod::Cash, t0() + Duration::minutes(10))
            .unwrap();
        ledger
            .finalize_session(&s2.id, PaymentMethod::Card, t0() + Duration::minutes(20))
            .unwrap();
        let manual = ledger
            .record_payment(
                NewPayment {
                    session_id: None,
                    table_number: 3,
                    customer_name: "Bar tab".to_string(),
                    amount_cents: 5000,
                    method: PaymentMethod::Transfer,
                },
                t0() + Duration::minutes(30),
            )
            .unwrap();

        let customers: Vec<&str> = ledger
            .payments()
            .iter()
            .map(|p| p.customer_name.as_str())
            .collect();
        assert_eq!(customers, ["Bar tab", "Bob", "Alice"]);
        assert_eq!(ledger.payments()[0], manual);
    }

    #[test]
    fn test_record_payment_rejects_non_positive_amounts() {
        let mut ledger = hall();
        let err = ledger
            .record_payment(
                NewPayment {
                    session_id: Some("whatever".to_string()),
                    table_number: 1,
                    customer_name: "Alice".to_string(),
                    amount_cents: 0,
                    method: PaymentMethod::Cash,
                },
                t0(),
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(ledger.payments().is_empty());
    }

    #[test]
    fn test_amount_owed_is_live() {
        let mut ledger = hall();
        let session = ledger.start_session("1", "Alice", t0()).unwrap();

        assert_eq!(ledger.amount_owed(&session.id, t0()).unwrap().cents(), 0);
        assert_eq!(
            ledger
                .amount_owed(&session.id, t0() + Duration::minutes(20))
                .unwrap()
                .cents(),
            5000
        );
        assert!(ledger.amount_owed("nope", t0()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_from_snapshot_reconciles_statuses() {
        let mut stale = table("1", 1, 15000);
        stale.status = TableStatus::Occupied;
        let mut broken = table("2", 2, 15000);
        broken.status = TableStatus::Maintenance;

        let ledger = Ledger::from_snapshot(LedgerSnapshot {
            tables: vec![stale, broken],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(status_of(&ledger, "1"), TableStatus::Available);
        assert_eq!(status_of(&ledger, "2"), TableStatus::Maintenance);
    }

    #[test]
    fn test_from_snapshot_rejects_double_occupancy() {
        let mut ledger = hall();
        let a = ledger.start_session("1", "Alice", t0()).unwrap();
        let mut b = a.clone();
        b.id = "duplicate".to_string();

        let mut snapshot = ledger.snapshot();
        snapshot.sessions.push(b);

        assert!(matches!(
            Ledger::from_snapshot(snapshot),
            Err(CoreError::TableOccupied { table_number: 1, .. })
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_negative_rates() {
        let result = Ledger::from_snapshot(LedgerSnapshot {
            tables: vec![table("1", 1, -1)],
            ..Default::default()
        });
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
