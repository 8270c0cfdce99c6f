//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` - Shared utility to load the expense ledger
//! - `load_settings` - Shared utility to resolve the insights config
//! - `resolve_date` - Parse a `--date` argument, defaulting to today
//! - `cmd_config` - Show the resolved configuration

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::{load_expenses, ConfigSource, Expense, InsightsConfig};

/// Load every expense in the ledger
pub fn open_ledger(path: &Path) -> Result<Vec<Expense>> {
    load_expenses(path).with_context(|| format!("Failed to read ledger {}", path.display()))
}

/// Resolve and load the insights config
pub fn load_settings(config_path: Option<&Path>) -> Result<InsightsConfig> {
    let source = ConfigSource::resolve(config_path)?;
    tracing::debug!(source = %source, "Using insights config");
    source.load().context("Failed to load insights config")
}

/// Parse a YYYY-MM-DD date, or use today's local date when absent
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let source = ConfigSource::resolve(config_path)?;
    let config = source.load().context("Failed to load insights config")?;

    println!();
    println!("⚙️  Insights Configuration");
    println!("   Source: {}", source);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Currency symbol:        {}", config.currency.symbol);
    println!("   Digit grouping:         {}", config.currency.grouping.as_str());
    println!("   Group separator:        {:?}", config.currency.separator);
    println!(
        "   High spend threshold:   {}",
        config.currency.format_whole(config.high_spend_threshold)
    );
    println!(
        "   Daily spend threshold:  {}",
        config.currency.format_whole(config.daily_spend_threshold)
    );
    println!(
        "   Increase concern at:    {:.0}%",
        config.increase_concern_ratio * 100.0
    );
    println!("   Max patterns:           {}", config.max_patterns);
    println!("   Max suggestions:        {}", config.max_suggestions);
    println!(
        "   Example amount:         {}",
        config.currency.format_amount(123_456.78)
    );

    Ok(())
}
