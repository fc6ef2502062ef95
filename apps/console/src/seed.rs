//! # Demo Seed Data
//!
//! Provisions a small hall for development: eight tables across the three
//! kinds, a few days of closed sessions with their payments, two tables in
//! play and one pending booking.
//!
//! ## Generated Hall
//! ```text
//!   #   kind        rate/hour   at startup
//!   1   pool        15000       occupied (45 min in)
//!   2   pool        15000       reserved (tomorrow 19:00)
//!   3   pool        15000       available
//!   4   pool        15000       available
//!   5   snooker     20000       available
//!   6   snooker     20000       occupied (20 min in)
//!   7   carambola   18000       available
//!   8   carambola   18000       maintenance
//! ```
//!
//! History is laid out relative to `now`, so the dashboard always has
//! something for today and the weekly trend.

use chrono::{DateTime, Duration, Utc};
use cuebook_core::{
    CoreResult, Ledger, LedgerSnapshot, Money, Payment, PaymentMethod, Reservation, Session,
    Table, TableKind, TableStatus,
};

/// Table layout: (number, kind, hourly rate)
const TABLES: &[(u32, TableKind, i64)] = &[
    (1, TableKind::Pool, 15000),
    (2, TableKind::Pool, 15000),
    (3, TableKind::Pool, 15000),
    (4, TableKind::Pool, 15000),
    (5, TableKind::Snooker, 20000),
    (6, TableKind::Snooker, 20000),
    (7, TableKind::Carambola, 18000),
    (8, TableKind::Carambola, 18000),
];

const MAINTENANCE_TABLE: u32 = 8;

/// Closed sessions: (table, customer, started minutes ago, minutes played, method)
const HISTORY: &[(u32, &str, i64, i64, PaymentMethod)] = &[
    (3, "Luis Pérez", 60 * 50, 60, PaymentMethod::Transfer),
    (1, "Carlos Ruiz", 60 * 26, 95, PaymentMethod::Cash),
    (5, "Marta Gómez", 60 * 24 + 30, 120, PaymentMethod::Card),
    (2, "Jorge Díaz", 60 * 5, 45, PaymentMethod::Card),
    (7, "Ana Torres", 60 * 3, 75, PaymentMethod::Cash),
];

/// Sessions still in play: (table, customer, started minutes ago)
const ACTIVE: &[(u32, &str, i64)] = &[(1, "Pedro Sánchez", 45), (6, "Sofía Ramírez", 20)];

/// Builds the demo snapshot around `now`.
pub fn demo_snapshot(now: DateTime<Utc>) -> LedgerSnapshot {
    let tables: Vec<Table> = TABLES
        .iter()
        .map(|&(number, kind, rate)| Table {
            id: number.to_string(),
            number,
            kind,
            status: if number == MAINTENANCE_TABLE {
                TableStatus::Maintenance
            } else {
                TableStatus::Available
            },
            hourly_rate_cents: rate,
        })
        .collect();

    let rate_of = |number: u32| {
        TABLES
            .iter()
            .find(|(n, _, _)| *n == number)
            .map(|&(_, _, rate)| Money::from_cents(rate))
            .unwrap_or_default()
    };

    let mut sessions = Vec::with_capacity(HISTORY.len() + ACTIVE.len());
    let mut payments = Vec::with_capacity(HISTORY.len());

    for (i, &(table, customer, ago, minutes, method)) in HISTORY.iter().enumerate() {
        let start = now - Duration::minutes(ago);
        let end = start + Duration::minutes(minutes);
        let amount = rate_of(table).charge_for_minutes(minutes).unwrap_or_default();
        let session_id = format!("demo-session-{}", i + 1);

        sessions.push(Session {
            id: session_id.clone(),
            table_id: table.to_string(),
            table_number: table,
            customer_name: customer.to_string(),
            start_time: start,
            end_time: Some(end),
            duration_minutes: Some(minutes),
            amount_cents: Some(amount.cents()),
            active: false,
        });

        payments.push(Payment {
            id: format!("demo-payment-{}", i + 1),
            session_id: Some(session_id),
            table_number: table,
            customer_name: customer.to_string(),
            amount_cents: amount.cents(),
            method,
            timestamp: end,
        });
    }

    for (i, &(table, customer, ago)) in ACTIVE.iter().enumerate() {
        sessions.push(Session {
            id: format!("demo-session-{}", HISTORY.len() + i + 1),
            table_id: table.to_string(),
            table_number: table,
            customer_name: customer.to_string(),
            start_time: now - Duration::minutes(ago),
            end_time: None,
            duration_minutes: None,
            amount_cents: None,
            active: true,
        });
    }

    payments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let reservations = vec![Reservation {
        id: "demo-reservation-1".to_string(),
        table_id: "2".to_string(),
        table_number: 2,
        customer_name: "Elena Castro".to_string(),
        phone: "555-0101".to_string(),
        date: (now + Duration::days(1)).date_naive(),
        start_time: "19:00".to_string(),
        duration_hours: 2,
        confirmed: false,
    }];

    LedgerSnapshot {
        tables,
        sessions,
        payments,
        reservations,
    }
}

/// Demo ledger, statuses reconciled from the seeded history.
pub fn demo_ledger(now: DateTime<Utc>) -> CoreResult<Ledger> {
    Ledger::from_snapshot(demo_snapshot(now))
}
