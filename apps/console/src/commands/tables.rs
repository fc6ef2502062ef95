//! # Table Commands
//!
//! Listing tables and the manual maintenance override.

use cuebook_core::{Table, TableStatus};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;

/// Lists every table with its current status.
pub fn list_tables(ledger: &LedgerState) -> Vec<Table> {
    debug!("list_tables command");
    ledger.with_ledger(|l| l.tables().to_vec())
}

/// Manually sets a table's status.
///
/// ## Arguments
/// * `table_id` - Table to change
/// * `status` - `available` or `maintenance`
///
/// ## Returns
/// The table as it stands afterwards. Asking for `available` on a table
/// with bookings comes back `reserved`.
pub fn set_table_status(
    ledger: &LedgerState,
    table_id: &str,
    status: TableStatus,
) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, status = %status, "set_table_status command");

    let table = ledger.with_ledger_mut(|l| l.set_table_status(table_id, status))?;

    info!(table = table.number, status = %table.status, "Table status changed");
    Ok(table)
}
