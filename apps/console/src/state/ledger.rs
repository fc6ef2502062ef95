//! # Ledger State
//!
//! Holds the hall's single `Ledger` behind a mutex.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command reads, computes and writes in one step
//! 2. Only one command may do that at a time, or a reader could see a
//!    finalized session without its payment
//! 3. The console, and any future server front end, may hold several
//!    handles to the same ledger
//!
//! ## Command Serialization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start_session ──┐                                                      │
//! │  finalize ───────┼──► lock() ──► Ledger::command(.., now) ──► unlock    │
//! │  reserve ────────┘       ▲                                              │
//! │                          │ one at a time                                │
//! │  tables / report ────────┘ (reads lock too, and release quickly)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use cuebook_core::Ledger;

/// Shared handle to the hall ledger.
///
/// Cloning the handle shares the same ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Wraps an already seeded ledger.
    pub fn new(ledger: Ledger) -> Self {
        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let tables = ledger_state.with_ledger(|l| l.tables().to_vec());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        // Ledger commands never leave partial writes behind, so state seen
        // through a poisoned lock is still consistent.
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// ledger_state.with_ledger_mut(|l| l.start_session("1", "Alice", now))?;
    /// ```
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}
