//! Tally CLI - Offline expense insights
//!
//! Usage:
//!   tally insights             Generate insights for the current month
//!   tally dashboard            Show week/month totals and recent expenses
//!   tally analytics            Show trends and category breakdown
//!   tally add --title ...      Record an expense

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tally_core::NewExpense;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Insights { date, json } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::cmd_insights(&cli.file, config, date, json)
        }
        Commands::Dashboard { date, json } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::cmd_dashboard(&cli.file, config, date, json)
        }
        Commands::Analytics { date, json } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::cmd_analytics(&cli.file, config, date, json)
        }
        Commands::List { limit } => commands::cmd_list(&cli.file, config, limit),
        Commands::Add {
            title,
            amount,
            category,
            date,
            payment_method,
            location,
            notes,
            tags,
            recurring,
        } => {
            let date = commands::resolve_date(date.as_deref())?;
            let new_expense = NewExpense {
                title: Some(title),
                amount: Some(amount),
                category: Some(category),
                date: Some(date),
                payment_method,
                location,
                notes,
                tags,
                is_recurring: recurring,
            };
            commands::cmd_add(&cli.file, new_expense)
        }
        Commands::Config => commands::cmd_config(config),
    }
}
