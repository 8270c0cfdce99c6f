//! Core types for the insights engine

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Natural-language report derived from an expense history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    /// One sentence covering total spend, count, and month-over-month change
    pub summary: String,
    /// Short observations, highest priority first
    pub patterns: Vec<String>,
    /// Actionable recommendations, highest priority first
    pub suggestions: Vec<String>,
    /// General budgeting guidance
    pub budget_tips: Vec<String>,
    /// Warnings about risky spending behavior
    pub concerns: Vec<String>,
}

/// Aggregates computed over an expense list for one reference date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightMetrics {
    pub reference_date: NaiveDate,
    pub this_month_start: NaiveDate,
    pub last_month_start: NaiveDate,
    pub last_month_end: NaiveDate,

    pub transaction_count: usize,
    pub total_expenses: f64,
    pub average_transaction: f64,

    pub this_month_total: f64,
    pub this_month_count: usize,
    pub last_month_total: f64,
    pub last_month_count: usize,
    /// Everything outside both windows, undated records included
    pub other_total: f64,

    /// Summed amount per category, only categories actually present
    pub category_totals: BTreeMap<Category, f64>,
    pub category_counts: BTreeMap<Category, usize>,
    pub top_category: Option<Category>,

    pub monthly_change: f64,
    /// Absolute change vs last month in percent, one decimal; 0 without a baseline
    pub change_percent: f64,

    pub weekend_count: usize,
    pub weekend_total: f64,
    pub has_subscriptions: bool,
    /// Any expense above twice its category's per-transaction average
    pub has_large_expense: bool,
}

impl InsightMetrics {
    pub fn category_count(&self) -> usize {
        self.category_totals.len()
    }

    /// This month's total spread over the elapsed days of the month
    pub fn daily_average(&self) -> f64 {
        use chrono::Datelike;
        self.this_month_total / self.reference_date.day() as f64
    }
}
