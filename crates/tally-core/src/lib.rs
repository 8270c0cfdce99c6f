//! Tally Core Library
//!
//! Shared functionality for the Tally expense insights tool:
//! - Expense and category models with input validation
//! - Offline insights engine (summary, patterns, suggestions, tips, concerns)
//! - Dashboard and analytics aggregates
//! - JSON/CSV expense ledgers
//! - Currency formatting and TOML configuration

pub mod config;
pub mod currency;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod period;
pub mod reports;

pub use config::{load_config, ConfigSource, InsightsConfig};
pub use currency::{CurrencyFormat, DigitGrouping};
pub use error::{Error, Result};
pub use import::{append_json, load_expenses, LedgerFormat};
pub use insights::{generate_insights, InsightEngine, InsightMetrics, InsightsReport};
pub use models::{Category, Expense, NewExpense, PaymentMethod};
