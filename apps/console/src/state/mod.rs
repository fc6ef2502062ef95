//! # State Module
//!
//! Application state for the console.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────┐        ┌──────────────────────┐      │
//! │          │    LedgerState       │        │    ConfigState       │      │
//! │          │                      │        │                      │      │
//! │          │  Arc<Mutex<Ledger>>  │        │  hall_name           │      │
//! │          │                      │        │  currency            │      │
//! │          └──────────────────────┘        └──────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: every command runs under the mutex, one at a time      │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;

pub use config::ConfigState;
pub use ledger::LedgerState;
