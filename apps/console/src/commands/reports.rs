//! # Report Commands
//!
//! Read-only rollups. Everything is recomputed from the ledger on each call.

use chrono::{DateTime, Datelike, Utc};
use cuebook_core::reports::{self, DashboardSummary, LiveBilling, RevenueBucket};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::LedgerState;

/// Days in the revenue trend shown by `report`.
pub const TREND_DAYS: u32 = 7;

/// Everything the `report` command prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub generated_at: DateTime<Utc>,
    pub summary: DashboardSummary,
    pub live: Vec<LiveBilling>,
    /// Today's takings per hour
    pub hourly: Vec<RevenueBucket>,
    /// Last `TREND_DAYS` days, oldest first
    pub daily: Vec<RevenueBucket>,
    /// This year's takings per month
    pub monthly: Vec<RevenueBucket>,
}

/// Running bill for every table in play.
pub fn live_billing(ledger: &LedgerState) -> Vec<LiveBilling> {
    live_billing_at(ledger, Utc::now())
}

pub fn live_billing_at(ledger: &LedgerState, now: DateTime<Utc>) -> Vec<LiveBilling> {
    debug!("live_billing command");
    ledger.with_ledger(|l| reports::live_billing(l, now))
}

pub fn report(ledger: &LedgerState) -> ReportResponse {
    report_at(ledger, Utc::now())
}

pub fn report_at(ledger: &LedgerState, now: DateTime<Utc>) -> ReportResponse {
    debug!("report command");

    let today = now.date_naive();
    ledger.with_ledger(|l| ReportResponse {
        generated_at: now,
        summary: reports::dashboard(l, now),
        live: reports::live_billing(l, now),
        hourly: reports::hourly_revenue(l.payments(), today),
        daily: reports::daily_revenue(l.payments(), today, TREND_DAYS),
        monthly: reports::monthly_revenue(l.payments(), today.year()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::payments::record_payment_at;
    use crate::seed::demo_ledger;
    use cuebook_core::{NewPayment, PaymentMethod};

    #[test]
    fn test_report_totals_match_payments() {
        let now = Utc::now();
        let ledger = LedgerState::new(demo_ledger(now).unwrap());

        record_payment_at(
            &ledger,
            NewPayment {
                session_id: None,
                table_number: 2,
                customer_name: "Walk-in".to_string(),
                amount_cents: 3000,
                method: PaymentMethod::Cash,
            },
            now,
        )
        .unwrap();

        let report = report_at(&ledger, now);
        let sum: i64 = ledger.with_ledger(|l| l.payments().iter().map(|p| p.amount_cents).sum());

        assert_eq!(report.summary.total_revenue_cents, sum);
        assert_eq!(report.summary.revenue_by_method.total().cents(), sum);
        assert_eq!(report.hourly.len(), 24);
        assert_eq!(report.daily.len(), TREND_DAYS as usize);
        assert_eq!(report.monthly.len(), 12);
        assert_eq!(
            report.hourly.iter().map(|b| b.amount_cents).sum::<i64>(),
            report.summary.today_revenue_cents
        );
    }

    #[test]
    fn test_live_billing_lists_active_sessions() {
        let now = Utc::now();
        let ledger = LedgerState::new(demo_ledger(now).unwrap());

        let live = live_billing_at(&ledger, now);
        let active = ledger.with_ledger(|l| l.active_sessions().count());

        assert_eq!(live.len(), active);
        assert!(live.iter().all(|l| l.amount_owed_cents > 0));
    }
}
