//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Understand where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Offline spending insights from an expense ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Expense ledger (.json or .csv)
    #[arg(short, long, default_value = "expenses.json", global = true)]
    pub file: PathBuf,

    /// Insights config file
    ///
    /// Defaults to ~/.config/tally/insights.toml when present, otherwise the
    /// built-in configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate spending insights (summary, patterns, suggestions, tips, concerns)
    Insights {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard overview
    Dashboard {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show monthly/daily trends and the category breakdown
    Analytics {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List expenses, newest first
    List {
        /// Number of expenses to show (at most 100)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a new expense in a JSON ledger
    Add {
        /// Short description (e.g., "Morning Coffee")
        #[arg(long)]
        title: String,

        /// Amount spent (must be greater than zero)
        #[arg(long)]
        amount: f64,

        /// Category: food, transportation, shopping, entertainment, bills,
        /// healthcare, education, travel, groceries, fitness, subscriptions, other
        #[arg(long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Payment method: cash, credit_card, debit_card, digital_wallet, bank_transfer
        #[arg(long)]
        payment_method: Option<String>,

        /// Where the money was spent
        #[arg(long)]
        location: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Mark as a recurring expense
        #[arg(long)]
        recurring: bool,
    },

    /// Show the resolved insights configuration
    Config,
}
