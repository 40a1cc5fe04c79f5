//! Settings display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::DisplayFormat;
use crate::config::{AppSettings, BudgetPaths};
use crate::engine::{allocate, fixed_entries};
use crate::models::{BudgetBucket, BudgetSettings};

#[derive(Tabled)]
struct FixedRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Recurs")]
    recurrence: String,
    #[tabled(rename = "Amount")]
    value: String,
}

/// Format income, its 50/30/20 split and the fixed expenses
pub fn format_budget_settings(settings: &BudgetSettings, format: &DisplayFormat) -> String {
    let mut output = String::new();
    let budget = allocate(settings.monthly_income);

    output.push_str(&format!(
        "Monthly income: {}\n",
        format.money(settings.monthly_income)
    ));
    for bucket in BudgetBucket::all() {
        output.push_str(&format!(
            "  {:<8} {:>3}%  {}\n",
            bucket.name(),
            bucket.target_percent(),
            format.money(budget.for_bucket(*bucket))
        ));
    }
    output.push('\n');

    let rows = fixed_entries(settings).into_iter().map(|entry| FixedRow {
        key: entry.key,
        name: entry.name,
        category: entry.category.name().to_string(),
        recurrence: entry.recurrence.to_string(),
        value: format.money(entry.value),
    });

    output.push_str("Fixed expenses:\n");
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');

    output
}

/// Format the app config and where things are stored
pub fn format_app_config(settings: &AppSettings, paths: &BudgetPaths) -> String {
    let mut output = String::new();

    output.push_str(&format!("Config file:   {}\n", paths.config_file().display()));
    output.push_str(&format!("Data dir:      {}\n", paths.data_dir().display()));
    output.push_str(&format!(
        "Currency:      {} ({:?}, decimal '{}', thousands '{}')\n",
        settings.currency.symbol,
        settings.currency.position,
        settings.currency.decimal_separator,
        settings.currency.thousands_separator
    ));
    output.push_str(&format!("Date format:   {}\n", settings.date_format));
    output.push_str(&format!("Log level:     {}\n", settings.log_level));
    output.push_str(&format!(
        "Require auth:  {}\n",
        if settings.require_auth { "yes" } else { "no" }
    ));
    if settings.allowed_emails.is_empty() {
        output.push_str("Allowed:       (nobody)\n");
    } else {
        output.push_str(&format!(
            "Allowed:       {}\n",
            settings.allowed_emails.join(", ")
        ));
    }

    output
}
