//! Insight Engine - turns expense aggregates into report text

use chrono::NaiveDate;

use crate::config::InsightsConfig;
use crate::currency::CurrencyFormat;
use crate::models::{Category, Expense};

use super::types::{InsightMetrics, InsightsReport};

/// Percent increase above which budget-discipline suggestions are added
const SHARP_INCREASE_PERCENT: f64 = 20.0;
/// Share of total spend a single average transaction must exceed to be "large"
const LARGE_TRANSACTION_SHARE: f64 = 0.4;
/// Transaction count below which large transactions are flagged
const FEW_TRANSACTIONS: usize = 5;
/// This-month transaction count above which daily averages are judged
const DAILY_CHECK_MIN_COUNT: usize = 5;
const WEEKEND_COUNT_SHARE: f64 = 0.4;
const WEEKEND_AMOUNT_SHARE: f64 = 0.5;
/// Category count above which spending counts as diverse
const DIVERSE_CATEGORIES: usize = 5;
/// Category count above which spending counts as spread
const SPREAD_CATEGORIES: usize = 2;

/// Produces insight reports from expense lists
///
/// The engine is immutable after construction and holds no per-call state,
/// so one instance can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightsConfig,
}

impl InsightEngine {
    /// Create an engine with default thresholds and rupee formatting
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    fn currency(&self) -> &CurrencyFormat {
        &self.config.currency
    }

    /// Generate the full report for `reference_date`
    pub fn generate(&self, expenses: &[Expense], reference_date: NaiveDate) -> InsightsReport {
        let metrics = InsightMetrics::compute(expenses, reference_date);

        tracing::debug!(
            transactions = metrics.transaction_count,
            this_month = metrics.this_month_count,
            last_month = metrics.last_month_count,
            categories = metrics.category_count(),
            "Computed insight metrics"
        );

        self.report_from_metrics(&metrics)
    }

    /// Render a report from precomputed metrics
    pub fn report_from_metrics(&self, metrics: &InsightMetrics) -> InsightsReport {
        InsightsReport {
            summary: self.summary(metrics),
            patterns: self.patterns(metrics),
            suggestions: self.suggestions(metrics),
            budget_tips: self.budget_tips(metrics),
            concerns: self.concerns(metrics),
        }
    }

    fn summary(&self, m: &InsightMetrics) -> String {
        let mut summary = format!(
            "You've spent {} across {} transactions.",
            self.currency().format_whole(m.total_expenses),
            m.transaction_count
        );

        if m.last_month_total > 0.0 {
            let direction = if m.monthly_change >= 0.0 {
                "increased"
            } else {
                "decreased"
            };
            summary.push_str(&format!(
                " Your spending {} by {:.1}% compared to last month.",
                direction, m.change_percent
            ));
        } else if m.transaction_count > 0 {
            summary.push_str(" Keep tracking your expenses to build better financial habits.");
        }

        summary
    }

    fn patterns(&self, m: &InsightMetrics) -> Vec<String> {
        let mut patterns = Vec::new();

        if let Some(top) = m.top_category {
            patterns.push(format!(
                "Your highest spending is in {} category",
                readable_category(top)
            ));
        }

        if m.average_transaction > 0.0 {
            patterns.push(format!(
                "Your average transaction is {}",
                self.currency().format_whole(m.average_transaction)
            ));
        }

        patterns.push(
            if m.monthly_change > 0.0 {
                "Your spending has increased this month"
            } else if m.monthly_change < 0.0 {
                "Your spending has decreased this month - great job!"
            } else {
                "Your spending is consistent with last month"
            }
            .to_string(),
        );

        let categories = m.category_count();
        if categories > DIVERSE_CATEGORIES {
            patterns.push(format!(
                "You have diverse spending across {} categories",
                categories
            ));
        } else if categories > SPREAD_CATEGORIES {
            patterns.push(format!(
                "Your spending is spread across {} main categories",
                categories
            ));
        } else if categories > 0 {
            patterns.push("Your spending is concentrated in a few categories".to_string());
        }

        patterns.truncate(self.config.max_patterns);
        patterns
    }

    fn suggestions(&self, m: &InsightMetrics) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(top) = m.top_category {
            if let Some(advice) = category_advice(top) {
                suggestions.push(format!(
                    "Consider {} to reduce {} expenses",
                    advice,
                    top.as_str().to_lowercase()
                ));
            }
        }

        if m.monthly_change > 0.0 && m.change_percent > SHARP_INCREASE_PERCENT {
            suggestions.push(
                "Review recent large purchases and evaluate if they were necessary".to_string(),
            );
            suggestions.push("Set spending alerts to stay within your monthly budget".to_string());
        }

        suggestions.push("Track expenses daily to build awareness of spending habits".to_string());

        if m.has_subscriptions {
            suggestions.push("Review all subscriptions - cancel services you rarely use".to_string());
        }

        if m.has_large_expense {
            suggestions
                .push("Plan for large expenses in advance to avoid budget surprises".to_string());
        }

        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }

    fn budget_tips(&self, m: &InsightMetrics) -> Vec<String> {
        let mut tips = vec![
            "Follow the 50/30/20 rule: 50% needs, 30% wants, 20% savings".to_string(),
            "Set up automatic transfers to your savings account each month".to_string(),
            "Create category-wise monthly budgets to control spending".to_string(),
        ];

        if m.this_month_total > self.config.high_spend_threshold {
            tips.push("Consider opening a high-yield savings account for better returns".to_string());
        } else {
            tips.push("Build an emergency fund with 3-6 months of expenses".to_string());
        }

        if m.category_count() > DIVERSE_CATEGORIES {
            tips.push("Use the envelope method to allocate cash for different categories".to_string());
        }

        tips
    }

    fn concerns(&self, m: &InsightMetrics) -> Vec<String> {
        let mut concerns = Vec::new();
        let ratio = self.config.increase_concern_ratio;

        if m.monthly_change > m.last_month_total * ratio && m.last_month_total > 0.0 {
            concerns.push(format!(
                "⚠️ Spending increased by more than {:.0}% - review recent purchases carefully",
                ratio * 100.0
            ));
        }

        if m.average_transaction > m.total_expenses * LARGE_TRANSACTION_SHARE
            && m.transaction_count < FEW_TRANSACTIONS
        {
            concerns
                .push("⚠️ Large transactions detected - ensure these align with your budget".to_string());
        }

        let daily_average = m.daily_average();
        if daily_average > self.config.daily_spend_threshold
            && m.this_month_count > DAILY_CHECK_MIN_COUNT
        {
            concerns.push(format!(
                "💡 Your daily spending average is {} - consider setting a daily limit",
                self.currency().format_whole(daily_average)
            ));
        }

        if m.weekend_count as f64 > m.this_month_count as f64 * WEEKEND_COUNT_SHARE
            && m.weekend_total > m.this_month_total * WEEKEND_AMOUNT_SHARE
        {
            concerns.push(
                "📊 Over 50% of spending occurs on weekends - plan weekend activities on a budget"
                    .to_string(),
            );
        }

        concerns
    }
}

/// Advice for the top category; categories without an entry get none
fn category_advice(category: Category) -> Option<&'static str> {
    match category {
        Category::Food => Some("meal planning and cooking at home"),
        Category::Transportation => Some("carpooling or using public transport"),
        Category::Shopping => Some("creating shopping lists and avoiding impulse buys"),
        Category::Entertainment => Some("finding free or low-cost activities"),
        Category::Subscriptions => Some("reviewing and canceling unused subscriptions"),
        Category::Groceries => Some("buying in bulk and comparing prices"),
        Category::Fitness => Some("exploring free workout options or home exercises"),
        Category::Bills
        | Category::Healthcare
        | Category::Education
        | Category::Travel
        | Category::Other => None,
    }
}

/// `SOME_NAME` -> `Some name` (first underscore only)
fn readable_category(category: Category) -> String {
    let code = category.as_str();
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase().replacen('_', " ", 1);
            format!("{}{}", first, rest)
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Wednesday, mid-month
    fn today() -> NaiveDate {
        date(2025, 6, 18)
    }

    fn engine() -> InsightEngine {
        InsightEngine::new()
    }

    #[test]
    fn test_empty_input() {
        let report = engine().generate(&[], today());

        assert_eq!(report.summary, "You've spent ₹0 across 0 transactions.");
        assert!(report.concerns.is_empty());
        assert_eq!(report.budget_tips.len(), 4);
        assert!(report
            .budget_tips
            .iter()
            .any(|t| t.contains("emergency fund")));
        assert_eq!(
            report.patterns,
            vec!["Your spending is consistent with last month".to_string()]
        );
        assert_eq!(
            report.suggestions,
            vec!["Track expenses daily to build awareness of spending habits".to_string()]
        );
    }

    #[test]
    fn test_empty_input_usd() {
        let engine =
            InsightEngine::with_config(InsightsConfig::with_currency(CurrencyFormat::usd()));
        let report = engine.generate(&[], today());
        assert!(report.summary.contains("$0"));
        assert!(report.summary.contains("0 transactions"));
    }

    #[test]
    fn test_idempotent() {
        let expenses = vec![
            Expense::new(120.5, Category::Food, date(2025, 6, 14)),
            Expense::new(80.25, Category::Travel, date(2025, 6, 2)),
            Expense::new(33.0, Category::Subscriptions, date(2025, 5, 12)),
        ];
        let first = engine().generate(&expenses, today());
        let second = engine().generate(&expenses, today());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_category_count_matches_input() {
        let expenses = vec![
            Expense::new(10.0, Category::Food, today()),
            Expense::new(10.0, Category::Food, today()),
            Expense::new(10.0, Category::Bills, date(2024, 1, 1)),
        ];
        let m = InsightMetrics::compute(&expenses, today());
        assert_eq!(m.category_count(), m.category_totals.len());
        assert_eq!(m.category_count(), 2);
        for category in m.category_totals.keys() {
            assert!(expenses.iter().any(|e| e.category == Some(*category)));
        }
    }

    #[test]
    fn test_increase_concern_threshold_is_exclusive() {
        let last_month = Expense::new(500.0, Category::Food, date(2025, 5, 10));

        // Change exactly 30% of last month: 650 - 500 = 150
        let at_threshold = vec![
            last_month.clone(),
            Expense::new(650.0, Category::Food, date(2025, 6, 10)),
        ];
        let report = engine().generate(&at_threshold, today());
        assert!(!report
            .concerns
            .iter()
            .any(|c| c.contains("more than 30%")));

        // Just over the threshold
        let above = vec![
            last_month,
            Expense::new(650.5, Category::Food, date(2025, 6, 10)),
        ];
        let report = engine().generate(&above, today());
        assert!(report.concerns.iter().any(|c| c.contains("more than 30%")));
    }

    #[test]
    fn test_scenario_month_over_month_doubling() {
        let mut expenses: Vec<Expense> = (1..=5)
            .map(|d| Expense::new(200.0, Category::Food, date(2025, 6, d + 1)))
            .collect();
        expenses.push(Expense::new(500.0, Category::Food, date(2025, 5, 20)));

        let m = InsightMetrics::compute(&expenses, today());
        assert_eq!(m.monthly_change, 500.0);
        assert_eq!(m.change_percent, 100.0);
        assert_eq!(m.top_category, Some(Category::Food));
        assert_eq!(m.category_count(), 1);

        let report = engine().report_from_metrics(&m);
        assert!(report.summary.contains("increased by 100.0%"));
        assert!(report
            .concerns
            .iter()
            .any(|c| c.contains("Spending increased by more than 30%")));
        assert_eq!(
            report.patterns[0],
            "Your highest spending is in Food category"
        );
        assert_eq!(
            report.suggestions,
            vec![
                "Consider meal planning and cooking at home to reduce food expenses",
                "Review recent large purchases and evaluate if they were necessary",
                "Set spending alerts to stay within your monthly budget",
                "Track expenses daily to build awareness of spending habits",
            ]
        );
    }

    #[test]
    fn test_scenario_single_large_purchase() {
        let expenses = vec![Expense::new(5000.0, Category::Shopping, date(2025, 6, 10))];

        let m = InsightMetrics::compute(&expenses, today());
        assert_eq!(m.average_transaction, 5000.0);

        let report = engine().report_from_metrics(&m);
        assert!(report
            .concerns
            .iter()
            .any(|c| c.contains("Large transactions detected")));
        assert_eq!(report.budget_tips.len(), 4);
        assert!(report.budget_tips[3].contains("emergency fund"));
        assert!(!report.budget_tips.iter().any(|t| t.contains("high-yield")));
        assert!(report
            .summary
            .ends_with("Keep tracking your expenses to build better financial habits."));
    }

    #[test]
    fn test_weekend_concern() {
        // 2025-06-07/08 and 14 are weekend days, 2025-06-10 is a Tuesday
        let weekend_heavy = vec![
            Expense::new(300.0, Category::Entertainment, date(2025, 6, 7)),
            Expense::new(300.0, Category::Entertainment, date(2025, 6, 8)),
            Expense::new(300.0, Category::Food, date(2025, 6, 14)),
            Expense::new(100.0, Category::Food, date(2025, 6, 10)),
        ];
        let report = engine().generate(&weekend_heavy, today());
        assert!(report.concerns.iter().any(|c| c.contains("weekends")));

        let weekday_heavy = vec![
            Expense::new(300.0, Category::Entertainment, date(2025, 6, 7)),
            Expense::new(300.0, Category::Entertainment, date(2025, 6, 9)),
            Expense::new(300.0, Category::Food, date(2025, 6, 11)),
            Expense::new(100.0, Category::Food, date(2025, 6, 10)),
        ];
        let report = engine().generate(&weekday_heavy, today());
        assert!(!report.concerns.iter().any(|c| c.contains("weekends")));
    }

    #[test]
    fn test_daily_average_concern() {
        // 6 weekday expenses of 2000 by the 18th: 12000 / 18 = 667 per day
        let expenses: Vec<Expense> = [2, 3, 4, 5, 9, 10]
            .iter()
            .map(|d| Expense::new(2000.0, Category::Bills, date(2025, 6, *d)))
            .collect();
        let report = engine().generate(&expenses, today());

        assert!(report
            .concerns
            .iter()
            .any(|c| c == "💡 Your daily spending average is ₹667 - consider setting a daily limit"));
        // 12000 this month crosses the high-spend threshold
        assert!(report.budget_tips.iter().any(|t| t.contains("high-yield")));
    }

    #[test]
    fn test_diversity_and_envelope_tip() {
        let categories = [
            Category::Food,
            Category::Transportation,
            Category::Shopping,
            Category::Entertainment,
            Category::Bills,
            Category::Healthcare,
        ];
        let expenses: Vec<Expense> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| Expense::new(10.0 + i as f64, *c, date(2025, 6, 3)))
            .collect();
        let report = engine().generate(&expenses, today());

        assert_eq!(report.patterns.len(), 4);
        assert_eq!(
            report.patterns[3],
            "You have diverse spending across 6 categories"
        );
        assert_eq!(report.budget_tips.len(), 5);
        assert!(report.budget_tips[4].contains("envelope method"));
        // Healthcare is the top category and has no advice entry
        assert!(!report.suggestions.iter().any(|s| s.starts_with("Consider")));
    }

    fn diversity_pattern(count: usize) -> String {
        let expenses: Vec<Expense> = Category::all()
            .iter()
            .take(count)
            .map(|c| Expense::new(10.0, *c, date(2025, 6, 3)))
            .collect();
        let report = engine().generate(&expenses, today());
        assert_eq!(report.patterns.len(), 4);
        report.patterns[3].clone()
    }

    #[test]
    fn test_diversity_tiers() {
        assert_eq!(
            diversity_pattern(1),
            "Your spending is concentrated in a few categories"
        );
        assert_eq!(
            diversity_pattern(2),
            "Your spending is concentrated in a few categories"
        );
        assert_eq!(
            diversity_pattern(3),
            "Your spending is spread across 3 main categories"
        );
        assert_eq!(
            diversity_pattern(5),
            "Your spending is spread across 5 main categories"
        );
        assert_eq!(
            diversity_pattern(6),
            "You have diverse spending across 6 categories"
        );
    }

    #[test]
    fn test_unchanged_month_reads_as_increase() {
        let expenses = vec![
            Expense::new(250.0, Category::Food, date(2025, 6, 3)),
            Expense::new(250.0, Category::Food, date(2025, 5, 3)),
        ];
        let report = engine().generate(&expenses, today());
        assert_eq!(
            report.summary,
            "You've spent ₹500 across 2 transactions. Your spending increased by 0.0% compared to last month."
        );
        assert!(report
            .patterns
            .contains(&"Your spending is consistent with last month".to_string()));
        assert!(!report.concerns.iter().any(|c| c.contains("more than 30%")));
    }

    #[test]
    fn test_subscription_suggestion_and_cap() {
        let expenses = vec![
            Expense::new(15.99, Category::Subscriptions, date(2025, 6, 2)),
            Expense::new(15.99, Category::Subscriptions, date(2025, 6, 3)),
            Expense::new(40.0, Category::Subscriptions, date(2025, 5, 3)),
        ];
        let report = engine().generate(&expenses, today());

        assert!(report.suggestions.len() <= 4);
        assert_eq!(
            report.suggestions[0],
            "Consider reviewing and canceling unused subscriptions to reduce subscriptions expenses"
        );
        assert!(report
            .suggestions
            .contains(&"Review all subscriptions - cancel services you rarely use".to_string()));
    }

    #[test]
    fn test_decrease_summary() {
        let expenses = vec![
            Expense::new(100.0, Category::Groceries, date(2025, 6, 3)),
            Expense::new(400.0, Category::Groceries, date(2025, 5, 3)),
        ];
        let report = engine().generate(&expenses, today());
        assert_eq!(
            report.summary,
            "You've spent ₹500 across 2 transactions. Your spending decreased by 75.0% compared to last month."
        );
        assert!(report
            .patterns
            .contains(&"Your spending has decreased this month - great job!".to_string()));
    }

    #[test]
    fn test_readable_category() {
        assert_eq!(readable_category(Category::Food), "Food");
        assert_eq!(readable_category(Category::Transportation), "Transportation");
    }

    #[test]
    fn test_configured_limits() {
        let config = InsightsConfig {
            max_patterns: 2,
            max_suggestions: 1,
            ..Default::default()
        };
        let expenses = vec![Expense::new(10.0, Category::Food, today())];
        let report = InsightEngine::with_config(config).generate(&expenses, today());
        assert_eq!(report.patterns.len(), 2);
        assert_eq!(report.suggestions.len(), 1);
    }
}
