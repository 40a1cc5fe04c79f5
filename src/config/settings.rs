//! Application settings for budget-tracker
//!
//! These are preferences of the installation (currency formatting, logging,
//! access control), stored in `config.json`. The budget itself (income and
//! fixed expenses) lives in the data directory, see `models::settings`.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::Money;

/// Where the currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    /// `1.234,56 €`
    #[default]
    After,
}

/// Currency display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    #[serde(default = "default_currency")]
    pub symbol: String,

    #[serde(default)]
    pub position: SymbolPosition,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_thousands_separator() -> char {
    '.'
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_currency(),
            position: SymbolPosition::default(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

impl CurrencyFormat {
    /// Format an amount, e.g. `1.234,56 €` with the defaults
    pub fn format(&self, amount: Money) -> String {
        let units = amount.units().abs().to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if amount.is_negative() { "-" } else { "" };
        let number = format!(
            "{}{}{:02}",
            grouped,
            self.decimal_separator,
            amount.cents_part()
        );

        match self.position {
            SymbolPosition::Before => format!("{}{}{}", sign, self.symbol, number),
            SymbolPosition::After => format!("{}{} {}", sign, number, self.symbol),
        }
    }
}

/// Installation-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub currency: CurrencyFormat,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Log filter used when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Refuse budget commands unless an allowed user is signed in
    #[serde(default)]
    pub require_auth: bool,

    /// Email addresses allowed to use the budget
    #[serde(default)]
    pub allowed_emails: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: CurrencyFormat::default(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            require_auth: false,
            allowed_emails: Vec::new(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.config_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read config file: {}", e)))?;

            let settings: AppSettings = serde_json::from_str(&contents)
                .map_err(|e| BudgetError::Config(format!("Failed to parse config file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(AppSettings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(paths.config_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check an email against the allow-list (case-insensitive)
    pub fn is_email_allowed(&self, email: &str) -> bool {
        let email = email.trim();
        self.allowed_emails
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(email))
    }
}
