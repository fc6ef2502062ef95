//! # Cuebook Console Library
//!
//! Operator console for a billiards hall. Wires configuration, logging and
//! the shared ledger together, then hands stdin to the shell.
//!
//! ## Module Organization
//! ```text
//! cuebook_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── ledger.rs   ◄─── LedgerState (Arc<Mutex<Ledger>>)
//! │   └── config.rs   ◄─── ConfigState (hall name, currency, seeding)
//! ├── commands/       ◄─── One function per operation, CoreError → ApiError
//! ├── seed.rs         ◄─── Demo hall
//! ├── shell.rs        ◄─── Line parser and stdin loop
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! Logs go to stderr so stdout carries only command output.

pub mod commands;
pub mod error;
pub mod seed;
pub mod shell;
pub mod state;

use chrono::Utc;
use cuebook_core::Ledger;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, LedgerState};

/// Runs the console until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info, debug for cuebook crates; RUST_LOG overrides       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults + CUEBOOK_* environment variables                        │
/// │                                                                         │
/// │  3. Seed Ledger ──────────────────────────────────────────────────────► │
/// │     • Demo hall, or empty with CUEBOOK_DEMO_DATA=false                  │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • stdin lines → commands → JSON on stdout                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Cuebook console");

    let config = ConfigState::from_env();
    info!(hall = %config.hall_name, demo = config.demo_data, "Configuration loaded");

    let ledger = if config.demo_data {
        seed::demo_ledger(Utc::now())?
    } else {
        Ledger::new()
    };
    info!(
        tables = ledger.tables().len(),
        sessions = ledger.sessions().len(),
        payments = ledger.payments().len(),
        reservations = ledger.reservations().len(),
        "Ledger seeded"
    );

    let ledger = LedgerState::new(ledger);
    shell::run_shell(BufReader::new(stdin()), stdout(), &ledger, &config).await?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cuebook=trace` - Show trace for cuebook crates only
/// - Default: INFO, DEBUG for cuebook crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cuebook=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
