//! # Configuration State
//!
//! Stores console configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CUEBOOK_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Hall name (shown in the banner and reports)
    pub hall_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places in the smallest currency unit.
    /// 0 for currencies billed in whole units (rates like 15000/hour).
    pub currency_decimals: u8,

    /// Seed the ledger with demo tables and history on startup
    pub demo_data: bool,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Hall: "Cuebook Billiards"
    /// - Currency: "$", whole units
    /// - Demo data: enabled
    fn default() -> Self {
        ConfigState {
            hall_name: "Cuebook Billiards".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 0,
            demo_data: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CUEBOOK_HALL_NAME`: Override hall name
    /// - `CUEBOOK_CURRENCY_SYMBOL`: Override currency symbol
    /// - `CUEBOOK_CURRENCY_DECIMALS`: Decimal places, 0-4
    /// - `CUEBOOK_DEMO_DATA`: `false`/`0` to start with an empty ledger
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(hall_name) = lookup("CUEBOOK_HALL_NAME") {
            config.hall_name = hall_name;
        }

        if let Some(symbol) = lookup("CUEBOOK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("CUEBOOK_CURRENCY_DECIMALS") {
            match decimals.trim().parse::<u8>() {
                Ok(d) if d <= 4 => config.currency_decimals = d,
                _ => warn!(value = %decimals, "Ignoring invalid CUEBOOK_CURRENCY_DECIMALS"),
            }
        }

        if let Some(demo) = lookup("CUEBOOK_DEMO_DATA") {
            match demo.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.demo_data = true,
                "0" | "false" | "no" | "off" => config.demo_data = false,
                _ => warn!(value = %demo, "Ignoring invalid CUEBOOK_DEMO_DATA"),
            }
        }

        config
    }

    /// Formats an amount in the smallest currency unit.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(22500), "$22500");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
