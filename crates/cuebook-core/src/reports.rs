//! # Reports
//!
//! Revenue and occupancy rollups for the dashboard.
//!
//! Every function here is a fold over the ledger's collections, recomputed
//! on each call. There is no cache to invalidate, so a report can never lag
//! behind the payments it summarizes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  payments ──┬──► total_revenue                                          │
//! │             ├──► revenue_on(today)                                      │
//! │             ├──► revenue_by_method      (cash / card / transfer)        │
//! │             ├──► hourly_revenue(day)    (24 buckets)                    │
//! │             ├──► daily_revenue(end, n)  (weekly trend)                  │
//! │             └──► monthly_revenue(year)  (12 buckets)                    │
//! │                                                                         │
//! │  tables ─────► table_status_counts                                      │
//! │                                                                         │
//! │  ledger + now ► live_billing            (elapsed / owed per session)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::billing::{current_amount_owed, elapsed_minutes};
use crate::ledger::Ledger;
use crate::money::Money;
use crate::types::{Payment, PaymentMethod, Table, TableStatus};

// =============================================================================
// Report Types
// =============================================================================

/// Revenue split by payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueByMethod {
    pub cash_cents: i64,
    pub card_cents: i64,
    pub transfer_cents: i64,
}

impl RevenueByMethod {
    pub fn get(&self, method: PaymentMethod) -> Money {
        Money::from_cents(match method {
            PaymentMethod::Cash => self.cash_cents,
            PaymentMethod::Card => self.card_cents,
            PaymentMethod::Transfer => self.transfer_cents,
        })
    }

    pub fn total(&self) -> Money {
        Money::from_cents(self.cash_cents + self.card_cents + self.transfer_cents)
    }
}

/// Number of tables in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableStatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub maintenance: usize,
}

impl TableStatusCounts {
    pub fn total(&self) -> usize {
        self.available + self.occupied + self.reserved + self.maintenance
    }
}

/// One point of a revenue trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueBucket {
    /// `HH:00` for hours, `YYYY-MM-DD` for days, `YYYY-MM` for months.
    pub label: String,
    pub amount_cents: i64,
}

/// Running figures for one active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiveBilling {
    pub session_id: String,
    pub table_number: u32,
    pub customer_name: String,
    pub elapsed_minutes: i64,
    pub amount_owed_cents: i64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_revenue_cents: i64,
    pub today_revenue_cents: i64,
    pub revenue_by_method: RevenueByMethod,
    pub table_counts: TableStatusCounts,
    pub active_sessions: usize,
    pub pending_reservations: usize,
    /// Sum of live amounts owed across active sessions.
    pub open_tab_cents: i64,
}

// =============================================================================
// Revenue Folds
// =============================================================================

/// Sum of every payment ever recorded.
pub fn total_revenue(payments: &[Payment]) -> Money {
    payments.iter().map(Payment::amount).sum()
}

/// Revenue taken on one UTC calendar day.
pub fn revenue_on(payments: &[Payment], date: NaiveDate) -> Money {
    payments
        .iter()
        .filter(|p| p.timestamp.date_naive() == date)
        .map(Payment::amount)
        .sum()
}

pub fn revenue_by_method(payments: &[Payment]) -> RevenueByMethod {
    payments
        .iter()
        .fold(RevenueByMethod::default(), |mut acc, p| {
            match p.method {
                PaymentMethod::Cash => acc.cash_cents += p.amount_cents,
                PaymentMethod::Card => acc.card_cents += p.amount_cents,
                PaymentMethod::Transfer => acc.transfer_cents += p.amount_cents,
            }
            acc
        })
}

/// Revenue per hour of `date`, always 24 buckets.
pub fn hourly_revenue(payments: &[Payment], date: NaiveDate) -> Vec<RevenueBucket> {
    let mut hours = [0i64; 24];
    for p in payments.iter().filter(|p| p.timestamp.date_naive() == date) {
        hours[p.timestamp.hour() as usize] += p.amount_cents;
    }

    hours
        .iter()
        .enumerate()
        .map(|(hour, amount)| RevenueBucket {
            label: format!("{:02}:00", hour),
            amount_cents: *amount,
        })
        .collect()
}

/// Revenue per day for the `days` days ending on `end` (inclusive), oldest
/// first. `daily_revenue(payments, today, 7)` is the weekly trend.
pub fn daily_revenue(payments: &[Payment], end: NaiveDate, days: u32) -> Vec<RevenueBucket> {
    (0..days)
        .rev()
        .map(|offset| end - Duration::days(i64::from(offset)))
        .map(|day| RevenueBucket {
            label: day.format("%Y-%m-%d").to_string(),
            amount_cents: revenue_on(payments, day).cents(),
        })
        .collect()
}

/// Revenue per month of `year`, always 12 buckets.
pub fn monthly_revenue(payments: &[Payment], year: i32) -> Vec<RevenueBucket> {
    let mut months = [0i64; 12];
    for p in payments.iter().filter(|p| p.timestamp.year() == year) {
        months[p.timestamp.month0() as usize] += p.amount_cents;
    }

    months
        .iter()
        .enumerate()
        .map(|(month0, amount)| RevenueBucket {
            label: format!("{}-{:02}", year, month0 + 1),
            amount_cents: *amount,
        })
        .collect()
}

// =============================================================================
// Occupancy
// =============================================================================

pub fn table_status_counts(tables: &[Table]) -> TableStatusCounts {
    tables
        .iter()
        .fold(TableStatusCounts::default(), |mut acc, t| {
            match t.status {
                TableStatus::Available => acc.available += 1,
                TableStatus::Occupied => acc.occupied += 1,
                TableStatus::Reserved => acc.reserved += 1,
                TableStatus::Maintenance => acc.maintenance += 1,
            }
            acc
        })
}

/// Elapsed time and amount owed for every active session at `now`.
///
/// Sessions that can't be priced are skipped: their table has disappeared
/// or the amount overflows.
pub fn live_billing(ledger: &Ledger, now: DateTime<Utc>) -> Vec<LiveBilling> {
    ledger
        .active_sessions()
        .filter_map(|session| {
            let table = ledger.table(&session.table_id)?;
            let owed = current_amount_owed(session, table.hourly_rate(), now)?;
            Some(LiveBilling {
                session_id: session.id.clone(),
                table_number: session.table_number,
                customer_name: session.customer_name.clone(),
                elapsed_minutes: elapsed_minutes(session.start_time, now),
                amount_owed_cents: owed.cents(),
            })
        })
        .collect()
}

pub fn dashboard(ledger: &Ledger, now: DateTime<Utc>) -> DashboardSummary {
    let payments = ledger.payments();
    let live = live_billing(ledger, now);

    DashboardSummary {
        total_revenue_cents: total_revenue(payments).cents(),
        today_revenue_cents: revenue_on(payments, now.date_naive()).cents(),
        revenue_by_method: revenue_by_method(payments),
        table_counts: table_status_counts(ledger.tables()),
        active_sessions: live.len(),
        pending_reservations: ledger.reservations().iter().filter(|r| !r.confirmed).count(),
        open_tab_cents: live.iter().map(|l| l.amount_owed_cents).sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
