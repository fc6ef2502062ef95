//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Pricing 90 minutes at 15000/hour with floats:                          │
//! │    90.0 / 60.0 * 15000.0 = 22500.000000000004 → ceil → 22501  ❌       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units, multiply before dividing            │
//! │    ceil(90 * 15000 / 60) = ceil(1350000 / 60) = 22500                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cuebook_core::money::Money;
//!
//! let rate = Money::from_cents(15000); // hourly rate
//! let charge = rate.charge_for_minutes(90);
//! assert_eq!(charge, Some(Money::from_cents(22500)));
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::MINUTES_PER_HOUR;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Table.hourly_rate ──► charge_for_minutes ──┬──► Session.amount         │
/// │                                             │                           │
/// │                                             └──► Payment.amount         │
/// │                                                                         │
/// │  Payments ──► reports::total_revenue / revenue_by_method / trends       │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use cuebook_core::money::Money;
    ///
    /// let rate = Money::from_cents(1099);
    /// assert_eq!(rate.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Prices `minutes` of play at `self` per hour, rounding up.
    ///
    /// ## Formula
    /// `ceil(minutes / 60 × rate)`, evaluated as `ceil(minutes × rate / 60)`
    /// in i128 so that the division happens last and no precision is lost.
    /// Returns `None` when the charge does not fit in an i64.
    ///
    /// ## Example
    /// ```rust
    /// use cuebook_core::money::Money;
    ///
    /// let rate = Money::from_cents(15000);
    /// assert_eq!(rate.charge_for_minutes(90), Some(Money::from_cents(22500)));
    /// assert_eq!(rate.charge_for_minutes(1), Some(Money::from_cents(250)));
    /// // 1.67 rounds up to 2
    /// assert_eq!(Money::from_cents(100).charge_for_minutes(1), Some(Money::from_cents(2)));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Table 3 (snooker): 18000/hour
    /// Session: 47 minutes
    ///      │
    ///      ▼
    /// charge_for_minutes(47) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Amount: 14100
    /// ```
    pub fn charge_for_minutes(&self, minutes: i64) -> Option<Money> {
        let numerator = self.0 as i128 * minutes as i128;
        let per_hour = MINUTES_PER_HOUR as i128;
        // Integer division truncates toward zero, which is already the
        // ceiling for negative numerators.
        let charged = if numerator > 0 {
            (numerator + per_hour - 1) / per_hour
        } else {
            numerator / per_hour
        };
        i64::try_from(charged).ok().map(Money::from_cents)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Folding payments into a revenue total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn charge(rate: i64, minutes: i64) -> i64 {
        Money::from_cents(rate).charge_for_minutes(minutes).unwrap().cents()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        a += b;
        assert_eq!(a.cents(), 1500);
    }

    #[test]
    fn test_charge_for_ninety_minutes() {
        assert_eq!(charge(15000, 90), 22500);
    }

    #[test]
    fn test_charge_rounds_up_partial_units() {
        // 100/hour for 1 minute = 1.666.. → 2
        assert_eq!(charge(100, 1), 2);
        // 12000/hour for 7 minutes = 1400 exactly
        assert_eq!(charge(12000, 7), 1400);
        // 12500/hour for 7 minutes = 1458.33.. → 1459
        assert_eq!(charge(12500, 7), 1459);
    }

    #[test]
    fn test_charge_for_zero_minutes_is_zero() {
        assert_eq!(charge(15000, 0), 0);
        assert_eq!(charge(0, 120), 0);
    }

    #[test]
    fn test_charge_that_overflows_is_none() {
        assert_eq!(Money::from_cents(i64::MAX).charge_for_minutes(120), None);
        assert_eq!(Money::from_cents(i64::MAX).charge_for_minutes(i64::MAX), None);
        // Exactly one hour at the largest rate still fits.
        assert_eq!(
            Money::from_cents(i64::MAX).charge_for_minutes(60),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_cents(100),
            Money::from_cents(250),
            Money::from_cents(-50),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 300);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }
}
