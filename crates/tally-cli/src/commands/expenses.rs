//! Expense command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use tally_core::{append_json, reports, LedgerFormat, NewExpense};

use super::{load_settings, open_ledger, truncate};

/// Upper bound for `tally list --limit`
pub const MAX_LIST_LIMIT: usize = 100;

pub fn cmd_list(ledger: &Path, config_path: Option<&Path>, limit: usize) -> Result<()> {
    let expenses = open_ledger(ledger)?;

    if expenses.is_empty() {
        println!("No expenses found. Add one with:");
        println!("  tally add --title \"Morning Coffee\" --amount 4.50 --category food");
        return Ok(());
    }

    let currency = load_settings(config_path)?.currency;
    let recent = reports::recent_expenses(&expenses, limit.min(MAX_LIST_LIMIT));

    println!();
    println!("📝 Expenses ({} of {})", recent.len(), expenses.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in &recent {
        let date = expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let category = expense.category.map(|c| c.label()).unwrap_or("-");
        let recurring = if expense.is_recurring { " ↻" } else { "" };

        println!(
            "   {} │ {:>12} │ {:18} │ {}{}",
            date,
            currency.format_amount(expense.amount_or_zero()),
            truncate(category, 18),
            truncate(expense.title.as_deref().unwrap_or("(untitled)"), 36),
            recurring
        );
    }

    Ok(())
}

pub fn cmd_add(ledger: &Path, new_expense: NewExpense) -> Result<()> {
    if LedgerFormat::from_path(ledger) != Some(LedgerFormat::Json) {
        bail!(
            "Can only add expenses to a .json ledger (got {})",
            ledger.display()
        );
    }

    let expense = new_expense.validate()?;

    if !ledger.exists() {
        tracing::info!(path = %ledger.display(), "Creating new ledger");
    }

    let count = append_json(ledger, &expense)
        .with_context(|| format!("Failed to write ledger {}", ledger.display()))?;

    println!(
        "✅ Added {} ({}, {})",
        expense.title.as_deref().unwrap_or_default(),
        expense.category.map(|c| c.label()).unwrap_or("-"),
        expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_default()
    );
    println!("   Ledger now holds {} expenses", count);

    Ok(())
}
