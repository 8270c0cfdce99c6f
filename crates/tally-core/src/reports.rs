//! Dashboard and analytics aggregates
//!
//! These are the numbers behind the overview screens: period totals, daily
//! and monthly trend series, and category breakdowns. Like the insights
//! engine they are pure functions of the expense slice and a reference day.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{
    AnalyticsReport, Category, CategorySpending, DashboardReport, Expense, MonthSummary,
    TrendDataPoint,
};
use crate::period;

/// Number of categories shown on the dashboard
const DASHBOARD_TOP_CATEGORIES: usize = 6;
/// Number of recent expenses shown on the dashboard
const DASHBOARD_RECENT: usize = 5;
const DASHBOARD_TREND_DAYS: i64 = 7;
const ANALYTICS_TREND_DAYS: i64 = 30;
const ANALYTICS_TREND_MONTHS: u32 = 6;

/// Build the dashboard overview as of `today`
pub fn dashboard(expenses: &[Expense], today: NaiveDate) -> DashboardReport {
    let (week_start, week_end) = period::week_bounds(today);
    let (this_week_total, _) = sum_between(expenses, week_start, week_end);
    let (this_month_total, _) = sum_between(
        expenses,
        period::month_start(today),
        period::month_end(today),
    );

    let daily_average = if expenses.is_empty() {
        0.0
    } else {
        this_month_total / today.day() as f64
    };

    let mut top_categories = category_breakdown(expenses, false);
    top_categories.truncate(DASHBOARD_TOP_CATEGORIES);

    DashboardReport {
        as_of: today,
        this_week_total,
        this_month_total,
        daily_average,
        total_expenses: expenses.len(),
        last_7_days: daily_trend(expenses, today, DASHBOARD_TREND_DAYS),
        top_categories,
        recent: recent_expenses(expenses, DASHBOARD_RECENT),
    }
}

/// Build the analytics view as of `today`
pub fn analytics(expenses: &[Expense], today: NaiveDate) -> AnalyticsReport {
    let this_month = month_summary(expenses, period::month_start(today));
    let last_month = month_summary(expenses, period::months_back(today, 1));

    let daily_average = if this_month.transaction_count > 0 {
        this_month.total / today.day() as f64
    } else {
        0.0
    };

    let monthly_trend = (0..ANALYTICS_TREND_MONTHS)
        .rev()
        .map(|back| {
            let start = period::months_back(today, back);
            let (amount, transaction_count) =
                sum_between(expenses, start, period::month_end(start));
            TrendDataPoint {
                period: start.format("%b %Y").to_string(),
                amount,
                transaction_count,
            }
        })
        .collect();

    AnalyticsReport {
        as_of: today,
        this_month,
        last_month,
        daily_average,
        categories: category_breakdown(expenses, true),
        monthly_trend,
        daily_trend: daily_trend(expenses, today, ANALYTICS_TREND_DAYS),
    }
}

/// Expenses sorted newest first, undated ones last, capped at `limit`
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    // Option orders None first, so compare reversed to put None last
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Category totals sorted by amount, largest first
///
/// With `skip_empty`, records with no amount (or a zero amount) are left
/// out entirely, so they neither add a category nor bump its count.
pub fn category_breakdown(expenses: &[Expense], skip_empty: bool) -> Vec<CategorySpending> {
    let mut totals: BTreeMap<Category, (f64, usize)> = BTreeMap::new();

    for expense in expenses {
        let Some(category) = expense.category else {
            continue;
        };
        let amount = expense.amount_or_zero();
        if skip_empty && amount == 0.0 {
            continue;
        }
        let entry = totals.entry(category).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let grand_total: f64 = totals.values().map(|(amount, _)| amount).sum();

    let mut categories: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategorySpending {
            category,
            label: category.label().to_string(),
            amount,
            percentage: if grand_total > 0.0 {
                amount / grand_total * 100.0
            } else {
                0.0
            },
            transaction_count,
        })
        .collect();

    // Stable sort keeps category order for equal amounts
    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    categories
}

fn month_summary(expenses: &[Expense], start: NaiveDate) -> MonthSummary {
    let (total, transaction_count) = sum_between(expenses, start, period::month_end(start));
    MonthSummary {
        month: start.format("%B %Y").to_string(),
        total,
        transaction_count,
    }
}

/// One point per day for the `days` days ending at `today`, oldest first
fn daily_trend(expenses: &[Expense], today: NaiveDate, days: i64) -> Vec<TrendDataPoint> {
    (0..days)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let (amount, transaction_count) = sum_between(expenses, day, day);
            TrendDataPoint {
                period: day.format("%b %d").to_string(),
                amount,
                transaction_count,
            }
        })
        .collect()
}

/// Sum and count of dated expenses within `[start, end]`
fn sum_between(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> (f64, usize) {
    expenses
        .iter()
        .filter(|e| e.date.is_some_and(|d| d >= start && d <= end))
        .fold((0.0, 0), |(total, count), e| {
            (total + e.amount_or_zero(), count + 1)
        })
}
