//! Insight Engine - Offline Financial Insights
//!
//! Derives a natural-language report from an expense history without any
//! network or AI dependency. Generation is a pure function of the expense
//! slice, the reference date, and the engine's configuration.
//!
//! ## Stages
//!
//! - **Metrics** - month windows, totals, category aggregation
//! - **Engine** - summary, patterns, suggestions, budget tips, concerns
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{generate_insights, InsightEngine};
//!
//! let report = generate_insights(&expenses, today);
//! let report = InsightEngine::with_config(config).generate(&expenses, today);
//! ```

pub mod engine;
pub mod metrics;
pub mod types;

use chrono::NaiveDate;

use crate::models::Expense;

pub use engine::InsightEngine;
pub use types::{InsightMetrics, InsightsReport};

/// Generate a report with the default configuration
pub fn generate_insights(expenses: &[Expense], reference_date: NaiveDate) -> InsightsReport {
    InsightEngine::new().generate(expenses, reference_date)
}
