//! Display formatting for terminal output
//!
//! Every function here returns a `String`; printing is up to the CLI.
//! Tables are rendered with `tabled`.

pub mod budget;
pub mod expense;
pub mod settings;

pub use budget::{format_forecast, format_overview, format_summary};
pub use expense::{format_expense_details, format_expense_table};
pub use settings::{format_app_config, format_budget_settings};

use chrono::NaiveDate;

use crate::config::{AppSettings, CurrencyFormat};
use crate::models::Money;

/// Currency and date preferences used by every formatter
#[derive(Debug, Clone)]
pub struct DisplayFormat {
    pub currency: CurrencyFormat,
    pub date_format: String,
}

impl DisplayFormat {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            currency: settings.currency.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        self.currency.format(amount)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let format = DisplayFormat::default();
        assert_eq!(format.money(Money::from_cents(123_456)), "1.234,56 €");
        assert_eq!(
            format.date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            "2024-06-01"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Weekly groceries at the market", 10), "Weekly gr…");
    }
}
