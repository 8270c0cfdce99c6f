//! Windowed aggregation over an expense list

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Category, Expense};
use crate::period;

use super::types::InsightMetrics;

/// Multiplier over a category's mean that marks an expense as large
const LARGE_EXPENSE_FACTOR: f64 = 2.0;

impl InsightMetrics {
    /// Compute all aggregates for `reference_date`
    ///
    /// Sums accumulate in input order, so a fixed input order always
    /// produces bit-identical totals.
    pub fn compute(expenses: &[Expense], reference_date: NaiveDate) -> Self {
        let this_month_start = period::month_start(reference_date);
        let (last_month_start, last_month_end) = period::previous_month(reference_date);

        let mut total_expenses = 0.0;
        let mut this_month_total = 0.0;
        let mut this_month_count = 0;
        let mut last_month_total = 0.0;
        let mut last_month_count = 0;
        let mut other_total = 0.0;
        let mut weekend_total = 0.0;
        let mut weekend_count = 0;
        let mut category_totals: BTreeMap<Category, f64> = BTreeMap::new();
        let mut category_counts: BTreeMap<Category, usize> = BTreeMap::new();

        for expense in expenses {
            let amount = expense.amount_or_zero();
            total_expenses += amount;

            match expense.date {
                Some(date) if date >= this_month_start => {
                    this_month_total += amount;
                    this_month_count += 1;
                    if period::is_weekend(date) {
                        weekend_total += amount;
                        weekend_count += 1;
                    }
                }
                Some(date) if date >= last_month_start && date <= last_month_end => {
                    last_month_total += amount;
                    last_month_count += 1;
                }
                _ => other_total += amount,
            }

            if let Some(category) = expense.category {
                *category_totals.entry(category).or_insert(0.0) += amount;
                *category_counts.entry(category).or_insert(0) += 1;
            }
        }

        let transaction_count = expenses.len();
        let average_transaction = if transaction_count > 0 {
            total_expenses / transaction_count as f64
        } else {
            0.0
        };

        let monthly_change = this_month_total - last_month_total;
        let change_percent = if last_month_total > 0.0 {
            round_to_tenth((monthly_change / last_month_total).abs() * 100.0)
        } else {
            0.0
        };

        let has_subscriptions = expenses
            .iter()
            .any(|e| e.category == Some(Category::Subscriptions));

        let has_large_expense = expenses.iter().any(|e| {
            let Some(category) = e.category else {
                return false;
            };
            let total = category_totals.get(&category).copied().unwrap_or(0.0);
            let count = category_counts.get(&category).copied().unwrap_or(0);
            count > 0 && e.amount_or_zero() > (total / count as f64) * LARGE_EXPENSE_FACTOR
        });

        Self {
            reference_date,
            this_month_start,
            last_month_start,
            last_month_end,
            transaction_count,
            total_expenses,
            average_transaction,
            this_month_total,
            this_month_count,
            last_month_total,
            last_month_count,
            other_total,
            top_category: top_category(&category_totals),
            category_totals,
            category_counts,
            monthly_change,
            change_percent,
            weekend_count,
            weekend_total,
            has_subscriptions,
            has_large_expense,
        }
    }
}

/// Category with the largest total; ties go to the earliest category
fn top_category(totals: &BTreeMap<Category, f64>) -> Option<Category> {
    let mut best: Option<(Category, f64)> = None;
    for (&category, &amount) in totals {
        match best {
            Some((_, best_amount)) if amount <= best_amount => {}
            _ => best = Some((category, amount)),
        }
    }
    best.map(|(category, _)| category)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
