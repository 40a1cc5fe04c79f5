//! Budget overview, summary and forecast formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::DisplayFormat;
use crate::models::{BudgetBucket, MonthlySummary, YearlyForecast};
use crate::services::BudgetOverview;

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Budget")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format the monthly overview: allocation, progress and headline figures
pub fn format_overview(overview: &BudgetOverview, format: &DisplayFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Budget for {} {}\n",
        overview.month.name(),
        overview.month.year()
    ));
    output.push_str(&format!(
        "Monthly income: {}\n\n",
        format.money(overview.budget.total)
    ));

    let rows = overview.progress.iter().map(|p| {
        let label = format!("{} ({}%)", p.bucket.name(), p.bucket.target_percent());
        let (spent_label, planned) = match p.bucket {
            BudgetBucket::Savings => (format!("{} saved", format.money(p.spent)), String::new()),
            _ => (format.money(p.spent), format.money(p.planned)),
        };
        ProgressRow {
            bucket: label,
            budgeted: format.money(p.budgeted),
            spent: spent_label,
            planned,
            remaining: format.money(p.remaining),
            used: format!(
                "{:.0}%{}",
                p.percent_used,
                if p.over_budget { " ⚠" } else { "" }
            ),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    output.push_str(&table.to_string());
    output.push('\n');

    for p in overview.progress.iter().filter(|p| p.over_budget) {
        let warning = match p.bucket {
            BudgetBucket::Savings => format!(
                "⚠ Savings are {} below the 20% target\n",
                format.money(-p.remaining)
            ),
            _ => format!(
                "⚠ {} is over budget by {}\n",
                p.bucket.name(),
                format.money(-p.remaining)
            ),
        };
        output.push_str(&warning);
    }

    output.push('\n');
    output.push_str(&format_summary(&overview.summary, format));
    output
}

/// Format the headline figures for a month
pub fn format_summary(summary: &MonthlySummary, format: &DisplayFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Spent:        {} ({:.1}% of income)\n",
        format.money(summary.total_spent),
        summary.percent_of_income_spent
    ));
    output.push_str(&format!(
        "Savings:      {} ({:.1}%)\n",
        format.money(summary.savings),
        summary.savings_rate
    ));
    output.push_str(&format!(
        "Status:       {}\n",
        if summary.on_track {
            "✓ On track for 20% savings"
        } else {
            "⚠ Below the 20% savings target"
        }
    ));

    output
}

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Needs")]
    needs: String,
    #[tabled(rename = "Wants")]
    wants: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
    #[tabled(rename = "Health")]
    health: String,
}

/// Format a yearly forecast as a month-by-month table with totals
pub fn format_forecast(forecast: &YearlyForecast, format: &DisplayFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Forecast for {}\n", forecast.year));
    output.push_str(&format!(
        "Spending rates: needs {:.0}%, wants {:.0}%, savings {:.0}%\n\n",
        forecast.rates.needs * 100.0,
        forecast.rates.wants * 100.0,
        forecast.rates.savings * 100.0
    ));

    let rows = forecast.months.iter().map(|m| ForecastRow {
        month: if m.is_current {
            format!("{} *", m.month.name())
        } else {
            m.month.name().to_string()
        },
        needs: format.money(m.projected.needs),
        wants: format.money(m.projected.wants),
        savings: format.money(m.projected.savings),
        cumulative: format.money(m.cumulative_savings),
        health: format!("{} {}", m.health.symbol(), m.health),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..5)).with(Alignment::right()));
    output.push_str(&table.to_string());
    output.push('\n');

    if forecast.months.iter().any(|m| m.is_current) {
        output.push_str("* current month, from actual spending\n");
    }
    output.push('\n');

    output.push_str(&format!(
        "Annual income:      {}\n",
        format.money(forecast.annual_income)
    ));
    output.push_str(&format!(
        "Projected spending: {}\n",
        format.money(forecast.projected_annual_spending)
    ));
    output.push_str(&format!(
        "Year-end savings:   {} ({:.1}%)\n",
        format.money(forecast.year_end_savings),
        forecast.savings_rate * 100.0
    ));
    output.push_str(&format!(
        "Savings target:     {}\n",
        format.money(forecast.savings_target)
    ));

    if forecast.meets_target {
        output.push_str(&format!(
            "✓ On track, {} above target\n",
            format.money(forecast.savings_gap)
        ));
    } else {
        output.push_str(&format!(
            "⚠ {} short of the 20% target\n",
            format.money(-forecast.savings_gap)
        ));
    }

    output
}
