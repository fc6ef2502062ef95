//! # Payment Commands

use chrono::{DateTime, Utc};
use cuebook_core::{NewPayment, Payment};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;

/// Lists payments, newest first.
pub fn list_payments(ledger: &LedgerState) -> Vec<Payment> {
    debug!("list_payments command");
    ledger.with_ledger(|l| l.payments().to_vec())
}

/// Records a payment that isn't tied to a checkout (bar tab, correction).
pub fn record_payment(ledger: &LedgerState, new: NewPayment) -> Result<Payment, ApiError> {
    record_payment_at(ledger, new, Utc::now())
}

pub fn record_payment_at(
    ledger: &LedgerState,
    new: NewPayment,
    now: DateTime<Utc>,
) -> Result<Payment, ApiError> {
    debug!(
        table = new.table_number,
        amount = new.amount_cents,
        method = %new.method,
        "record_payment command"
    );

    let payment = ledger.with_ledger_mut(|l| l.record_payment(new, now))?;

    info!(payment_id = %payment.id, amount = payment.amount_cents, "Payment recorded");
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use cuebook_core::PaymentMethod;

    fn new_payment(amount_cents: i64) -> NewPayment {
        NewPayment {
            session_id: None,
            table_number: 4,
            customer_name: "Bar tab".to_string(),
            amount_cents,
            method: PaymentMethod::Transfer,
        }
    }

    #[test]
    fn test_manual_payments_newest_first() {
        let ledger = LedgerState::default();

        let first = record_payment(&ledger, new_payment(5000)).unwrap();
        let second = record_payment(&ledger, new_payment(7000)).unwrap();

        let ids: Vec<String> = list_payments(&ledger).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let ledger = LedgerState::default();

        let err = record_payment(&ledger, new_payment(0)).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_payments(&ledger).is_empty());
    }
}
