//! Report command implementations

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::models::{CategorySpending, TrendDataPoint};
use tally_core::{reports, CurrencyFormat};

use super::{load_settings, open_ledger, truncate};

/// Width of the longest bar in trend charts
const BAR_WIDTH: usize = 30;

pub fn cmd_dashboard(
    ledger: &Path,
    config_path: Option<&Path>,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let expenses = open_ledger(ledger)?;
    let report = reports::dashboard(&expenses, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let currency = load_settings(config_path)?.currency;

    println!();
    println!("📊 Dashboard (as of {})", report.as_of);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   This week:      {}",
        currency.format_amount(report.this_week_total)
    );
    println!(
        "   This month:     {}",
        currency.format_amount(report.this_month_total)
    );
    println!(
        "   Daily average:  {}",
        currency.format_amount(report.daily_average)
    );
    println!("   Expenses:       {}", report.total_expenses);

    if report.total_expenses == 0 {
        println!();
        println!("   No expenses yet. Add one with:");
        println!("     tally add --title \"Morning Coffee\" --amount 4.50 --category food");
        return Ok(());
    }

    println!();
    println!("📈 Last 7 Days");
    print_trend(&report.last_7_days, &currency);

    println!();
    println!("🏷️  Top Categories");
    print_categories(&report.top_categories, &currency);

    println!();
    println!("📝 Recent Expenses");
    for expense in &report.recent {
        let date = expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!(
            "   {} │ {:>12} │ {}",
            date,
            currency.format_amount(expense.amount_or_zero()),
            truncate(expense.title.as_deref().unwrap_or("(untitled)"), 40)
        );
    }

    Ok(())
}

pub fn cmd_analytics(
    ledger: &Path,
    config_path: Option<&Path>,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let expenses = open_ledger(ledger)?;
    let report = reports::analytics(&expenses, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let currency = load_settings(config_path)?.currency;

    println!();
    println!("📊 Analytics (as of {})", report.as_of);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:20} {:>14} ({} expenses)",
        report.this_month.month,
        currency.format_amount(report.this_month.total),
        report.this_month.transaction_count
    );
    println!(
        "   {:20} {:>14} ({} expenses)",
        report.last_month.month,
        currency.format_amount(report.last_month.total),
        report.last_month.transaction_count
    );
    println!(
        "   Daily average:       {:>14}",
        currency.format_amount(report.daily_average)
    );

    println!();
    println!("📅 Monthly Trend");
    print_trend(&report.monthly_trend, &currency);

    println!();
    println!("📈 Last 30 Days");
    print_trend(&report.daily_trend, &currency);

    println!();
    println!("🏷️  Categories");
    if report.categories.is_empty() {
        println!("   No spending recorded.");
    } else {
        print_categories(&report.categories, &currency);
    }

    Ok(())
}

fn print_categories(categories: &[CategorySpending], currency: &CurrencyFormat) {
    println!(
        "   {:20} │ {:>14} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ─────────────────────┼────────────────┼────────┼───────");
    for cat in categories {
        println!(
            "   {:20} │ {:>14} │ {:>5.1}% │ {:>5}",
            truncate(&cat.label, 20),
            currency.format_amount(cat.amount),
            cat.percentage,
            cat.transaction_count
        );
    }
}

fn print_trend(points: &[TrendDataPoint], currency: &CurrencyFormat) {
    let max = points.iter().map(|p| p.amount).fold(0.0_f64, f64::max);
    for point in points {
        println!(
            "   {:8} │ {:>14} │ {}",
            point.period,
            currency.format_amount(point.amount),
            bar(point.amount, max)
        );
    }
}

/// Proportional bar for a trend chart
pub fn bar(amount: f64, max: f64) -> String {
    if max <= 0.0 || amount <= 0.0 {
        return String::new();
    }
    let len = ((amount / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len.min(BAR_WIDTH))
}
