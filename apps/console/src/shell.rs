//! # Operator Shell
//!
//! Line-oriented front end: one command per line in, JSON (or a text report)
//! out. Errors are printed and the loop keeps reading; only `quit` or end of
//! input stops it.
//!
//! ## Grammar
//! ```text
//! tables | sessions | payments | reservations
//! status   <table> <available|maintenance>
//! start    <table> <customer...>
//! finalize <session> <cash|card|transfer>
//! pay      <table-number> <amount> <cash|card|transfer> <customer...>
//! reserve  <table> <YYYY-MM-DD> <HH:MM> <hours> <phone> <customer...>
//! confirm  <reservation>
//! cancel   <reservation>
//! live | report | help | quit
//! ```
//!
//! Amounts are in the smallest currency unit.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::NaiveDate;
use cuebook_core::{NewPayment, NewReservation, PaymentMethod, TableStatus};
use serde::Serialize;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::commands::reports::ReportResponse;
use crate::commands::{payments, reports, reservations, sessions, tables};
use crate::error::ApiError;
use crate::state::{ConfigState, LedgerState};

pub const HELP: &str = "\
Commands:
  tables                                   list tables
  sessions                                 list sessions
  payments                                 list payments (newest first)
  reservations                             list reservations
  status <table> <available|maintenance>   set a table's status
  start <table> <customer...>              start a session
  finalize <session> <method>              close a session and take payment
  pay <table-no> <amount> <method> <customer...>
                                           record a manual payment
  reserve <table> <date> <HH:MM> <hours> <phone> <customer...>
                                           book a table
  confirm <reservation>                    confirm a booking
  cancel <reservation>                     cancel a booking
  live                                     running bills
  report                                   revenue and occupancy report
  help                                     this text
  quit                                     leave
Methods: cash, card, transfer. Dates: YYYY-MM-DD.";

/// Why a line couldn't be turned into a command.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// A parsed operator command.
#[derive(Debug, Clone)]
pub enum ShellCommand {
    Tables,
    Sessions,
    Payments,
    Reservations,
    Status { table_id: String, status: TableStatus },
    Start { table_id: String, customer_name: String },
    Finalize { session_id: String, method: PaymentMethod },
    Pay(NewPayment),
    Reserve(NewReservation),
    Confirm(String),
    Cancel(String),
    Live,
    Report,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<ShellCommand>, ParseError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "tables" => ShellCommand::Tables,
            "sessions" => ShellCommand::Sessions,
            "payments" => ShellCommand::Payments,
            "reservations" => ShellCommand::Reservations,
            "live" => ShellCommand::Live,
            "report" => ShellCommand::Report,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,

            "status" => match args {
                [table_id, status] => ShellCommand::Status {
                    table_id: table_id.to_string(),
                    status: parse_field("status", status)?,
                },
                _ => return Err(ParseError::Usage("status <table> <available|maintenance>")),
            },

            "start" => match args {
                [table_id, customer @ ..] if !customer.is_empty() => ShellCommand::Start {
                    table_id: table_id.to_string(),
                    customer_name: customer.join(" "),
                },
                _ => return Err(ParseError::Usage("start <table> <customer...>")),
            },

            "finalize" => match args {
                [session_id, method] => ShellCommand::Finalize {
                    session_id: session_id.to_string(),
                    method: parse_field("method", method)?,
                },
                _ => return Err(ParseError::Usage("finalize <session> <cash|card|transfer>")),
            },

            "pay" => match args {
                [table_number, amount, method, customer @ ..] if !customer.is_empty() => {
                    ShellCommand::Pay(NewPayment {
                        session_id: None,
                        table_number: parse_field("table number", table_number)?,
                        customer_name: customer.join(" "),
                        amount_cents: parse_field("amount", amount)?,
                        method: parse_field("method", method)?,
                    })
                }
                _ => {
                    return Err(ParseError::Usage(
                        "pay <table-number> <amount> <cash|card|transfer> <customer...>",
                    ))
                }
            },

            "reserve" => match args {
                [table_id, date, start_time, hours, phone, customer @ ..]
                    if !customer.is_empty() =>
                {
                    ShellCommand::Reserve(NewReservation {
                        table_id: table_id.to_string(),
                        customer_name: customer.join(" "),
                        phone: phone.to_string(),
                        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                            ParseError::Invalid {
                                field: "date",
                                value: date.to_string(),
                            }
                        })?,
                        start_time: start_time.to_string(),
                        duration_hours: parse_field("hours", hours)?,
                    })
                }
                _ => {
                    return Err(ParseError::Usage(
                        "reserve <table> <YYYY-MM-DD> <HH:MM> <hours> <phone> <customer...>",
                    ))
                }
            },

            "confirm" => match args {
                [id] => ShellCommand::Confirm(id.to_string()),
                _ => return Err(ParseError::Usage("confirm <reservation>")),
            },

            "cancel" => match args {
                [id] => ShellCommand::Cancel(id.to_string()),
                _ => return Err(ParseError::Usage("cancel <reservation>")),
            },

            _ => return Err(ParseError::Unknown(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::Invalid {
        field,
        value: value.to_string(),
    })
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Runs one command against the ledger.
pub fn execute(command: ShellCommand, ledger: &LedgerState, config: &ConfigState) -> Outcome {
    let output = match command {
        ShellCommand::Tables => to_json(&tables::list_tables(ledger)),
        ShellCommand::Sessions => to_json(&sessions::list_sessions(ledger)),
        ShellCommand::Payments => to_json(&payments::list_payments(ledger)),
        ShellCommand::Reservations => to_json(&reservations::list_reservations(ledger)),
        ShellCommand::Status { table_id, status } => {
            respond(tables::set_table_status(ledger, &table_id, status))
        }
        ShellCommand::Start {
            table_id,
            customer_name,
        } => respond(sessions::start_session(ledger, &table_id, &customer_name)),
        ShellCommand::Finalize { session_id, method } => {
            respond(sessions::finalize_session(ledger, &session_id, method))
        }
        ShellCommand::Pay(new) => respond(payments::record_payment(ledger, new)),
        ShellCommand::Reserve(new) => respond(reservations::create_reservation(ledger, new)),
        ShellCommand::Confirm(id) => respond(reservations::confirm_reservation(ledger, &id)),
        ShellCommand::Cancel(id) => respond(reservations::cancel_reservation(ledger, &id)),
        ShellCommand::Live => to_json(&reports::live_billing(ledger)),
        ShellCommand::Report => render_report(&reports::report(ledger), config),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return Outcome::Quit,
    };

    Outcome::Print(output)
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a ApiError,
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> String {
    match result {
        Ok(value) => to_json(&value),
        Err(err) => error_json(&err),
    }
}

fn error_json(err: &ApiError) -> String {
    warn!(code = ?err.code, message = %err.message, "Command failed");
    to_json(&ErrorResponse { error: err })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        error!(error = %e, "Failed to serialize response");
        ApiError::internal(e.to_string()).to_string()
    })
}

/// Text rendering of the dashboard, amounts in the configured currency.
pub fn render_report(report: &ReportResponse, config: &ConfigState) -> String {
    let money = |cents: i64| config.format_currency(cents);
    let summary = &report.summary;
    let mut out = String::new();

    // Writing into a String can't fail.
    let generated = report.generated_at.format("%Y-%m-%d %H:%M UTC");
    let _ = writeln!(out, "{} - {}", config.hall_name, generated);
    let _ = writeln!(out, "Revenue today:   {}", money(summary.today_revenue_cents));
    let _ = writeln!(out, "Revenue total:   {}", money(summary.total_revenue_cents));
    for method in PaymentMethod::ALL {
        let _ = writeln!(
            out,
            "  {:<9} {}",
            method.as_str(),
            money(summary.revenue_by_method.get(method).cents())
        );
    }

    let counts = &summary.table_counts;
    let _ = writeln!(
        out,
        "Tables:          {} available, {} occupied, {} reserved, {} maintenance",
        counts.available, counts.occupied, counts.reserved, counts.maintenance
    );
    let _ = writeln!(
        out,
        "Pending bookings: {}",
        summary.pending_reservations
    );

    let _ = writeln!(
        out,
        "In play:         {} session(s), open tab {}",
        summary.active_sessions,
        money(summary.open_tab_cents)
    );
    for live in &report.live {
        let _ = writeln!(
            out,
            "  table {:>2}  {:<20} {:>4} min  {}",
            live.table_number,
            live.customer_name,
            live.elapsed_minutes,
            money(live.amount_owed_cents)
        );
    }

    let _ = writeln!(out, "Last {} days:", report.daily.len());
    for day in &report.daily {
        let _ = writeln!(out, "  {}  {}", day.label, money(day.amount_cents));
    }

    out.trim_end().to_string()
}

/// Reads commands from `reader` until `quit` or end of input, writing each
/// response to `writer`.
pub async fn run_shell<R, W>(
    reader: R,
    mut writer: W,
    ledger: &LedgerState,
    config: &ConfigState,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(format!("{} ready. Type `help` for commands.\n", config.hall_name).as_bytes())
        .await?;
    writer.flush().await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let output = match ShellCommand::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                debug!(?command, "Parsed command");
                match execute(command, ledger, config) {
                    Outcome::Print(output) => output,
                    Outcome::Quit => break,
                }
            }
            Err(e) => error_json(&ApiError::validation(e.to_string())),
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    info!("Shell closed");
    Ok(())
}
