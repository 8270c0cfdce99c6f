//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Expense category
///
/// Declaration order is significant: it is the `Ord` used to break ties
/// between categories with equal totals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Travel,
    Groceries,
    Fitness,
    Subscriptions,
    Other,
}

impl Category {
    /// All categories in declaration order
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::Bills,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Groceries,
            Self::Fitness,
            Self::Subscriptions,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Transportation => "TRANSPORTATION",
            Self::Shopping => "SHOPPING",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Bills => "BILLS",
            Self::Healthcare => "HEALTHCARE",
            Self::Education => "EDUCATION",
            Self::Travel => "TRAVEL",
            Self::Groceries => "GROCERIES",
            Self::Fitness => "FITNESS",
            Self::Subscriptions => "SUBSCRIPTIONS",
            Self::Other => "OTHER",
        }
    }

    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Groceries => "Groceries",
            Self::Fitness => "Fitness & Sports",
            Self::Subscriptions => "Subscriptions",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FOOD" => Ok(Self::Food),
            "TRANSPORTATION" => Ok(Self::Transportation),
            "SHOPPING" => Ok(Self::Shopping),
            "ENTERTAINMENT" => Ok(Self::Entertainment),
            "BILLS" => Ok(Self::Bills),
            "HEALTHCARE" => Ok(Self::Healthcare),
            "EDUCATION" => Ok(Self::Education),
            "TRAVEL" => Ok(Self::Travel),
            "GROCERIES" => Ok(Self::Groceries),
            "FITNESS" => Ok(Self::Fitness),
            "SUBSCRIPTIONS" => Ok(Self::Subscriptions),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method used for an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    DigitalWallet,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::DigitalWallet => "DIGITAL_WALLET",
            Self::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "DEBIT_CARD" => Ok(Self::DebitCard),
            "DIGITAL_WALLET" => Ok(Self::DigitalWallet),
            "BANK_TRANSFER" => Ok(Self::BankTransfer),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
///
/// Every field is optional because ledgers come from outside and may be
/// incomplete. Aggregations treat a missing amount as zero and skip a
/// record from any grouping whose key (category, date) is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Expense {
    /// Create an expense with just the fields that drive aggregation
    pub fn new(amount: f64, category: Category, date: NaiveDate) -> Self {
        Self {
            amount: Some(amount),
            category: Some(category),
            date: Some(date),
            ..Default::default()
        }
    }

    /// Amount with a missing value counted as zero
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// An expense as submitted by a user, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl NewExpense {
    /// Check required fields and normalize enums into an `Expense`
    ///
    /// Title, a non-zero amount, category, and date are required. Category
    /// and payment method are matched case-insensitively.
    pub fn validate(self) -> Result<Expense> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let amount = self.amount.filter(|a| *a != 0.0);
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let (Some(title), Some(amount), Some(category), Some(date)) =
            (title, amount, category, self.date)
        else {
            return Err(Error::Validation(
                "Missing required fields (title, amount, category, date)".into(),
            ));
        };

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::Validation(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }

        let category: Category = category.parse().map_err(Error::Validation)?;
        let payment_method = self
            .payment_method
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.parse::<PaymentMethod>())
            .transpose()
            .map_err(Error::Validation)?;

        Ok(Expense {
            title: Some(title),
            amount: Some(amount),
            category: Some(category),
            date: Some(date),
            payment_method,
            location: self.location.filter(|s| !s.trim().is_empty()),
            notes: self.notes.filter(|s| !s.trim().is_empty()),
            tags: self.tags,
            is_recurring: self.is_recurring,
        })
    }
}

// ========== Report Models ==========

/// A spending category in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: Category,
    pub label: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// A single data point in a trend series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub period: String,
    pub amount: f64,
    pub transaction_count: usize,
}

/// Totals for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: String,
    pub total: f64,
    pub transaction_count: usize,
}

/// Overview shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub this_week_total: f64,
    pub this_month_total: f64,
    pub daily_average: f64,
    pub total_expenses: usize,
    pub last_7_days: Vec<TrendDataPoint>,
    pub top_categories: Vec<CategorySpending>,
    pub recent: Vec<Expense>,
}

/// Detailed spending analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub as_of: NaiveDate,
    pub this_month: MonthSummary,
    pub last_month: MonthSummary,
    pub daily_average: f64,
    pub categories: Vec<CategorySpending>,
    pub monthly_trend: Vec<TrendDataPoint>,
    pub daily_trend: Vec<TrendDataPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(
            " Subscriptions ".parse::<Category>().unwrap(),
            Category::Subscriptions
        );
        assert!("PETS".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order_matches_all() {
        let mut sorted = Category::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::all());
        assert_eq!(Category::all().len(), 12);
    }

    #[test]
    fn test_category_serde_uses_upper_case() {
        let json = serde_json::to_string(&Category::Groceries).unwrap();
        assert_eq!(json, "\"GROCERIES\"");
        let pm: PaymentMethod = serde_json::from_str("\"DIGITAL_WALLET\"").unwrap();
        assert_eq!(pm, PaymentMethod::DigitalWallet);
    }

    #[test]
    fn test_validate_normalizes_enums() {
        let expense = NewExpense {
            title: Some("Morning Coffee".into()),
            amount: Some(4.5),
            category: Some("food".into()),
            date: Some(date(2025, 9, 17)),
            payment_method: Some("credit_card".into()),
            location: Some("".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(expense.category, Some(Category::Food));
        assert_eq!(expense.payment_method, Some(PaymentMethod::CreditCard));
        assert_eq!(expense.location, None);
        assert!(!expense.is_recurring);
        assert!(expense.tags.is_empty());
    }

    #[test]
    fn test_validate_missing_fields() {
        let result = NewExpense {
            title: Some("Lunch".into()),
            amount: Some(12.0),
            category: Some("FOOD".into()),
            ..Default::default()
        }
        .validate();
        assert!(matches!(result, Err(Error::Validation(_))));

        // Zero amount counts as missing
        let result = NewExpense {
            title: Some("Lunch".into()),
            amount: Some(0.0),
            category: Some("FOOD".into()),
            date: Some(date(2025, 1, 1)),
            ..Default::default()
        }
        .validate();
        assert!(result.unwrap_err().to_string().contains("Missing required"));
    }

    #[test]
    fn test_validate_rejects_negative_and_unknown() {
        let base = NewExpense {
            title: Some("Refund".into()),
            amount: Some(-5.0),
            category: Some("FOOD".into()),
            date: Some(date(2025, 1, 1)),
            ..Default::default()
        };
        assert!(base.clone().validate().is_err());

        let unknown = NewExpense {
            amount: Some(5.0),
            category: Some("PETS".into()),
            ..base
        };
        let err = unknown.validate().unwrap_err();
        assert!(err.to_string().contains("Unknown category"));
    }

    #[test]
    fn test_expense_serializes_camel_case() {
        let mut expense = Expense::new(15.99, Category::Subscriptions, date(2025, 9, 14));
        expense.is_recurring = true;
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["category"], "SUBSCRIPTIONS");
        assert_eq!(json["date"], "2025-09-14");
        assert_eq!(json["isRecurring"], true);
        assert!(json.get("title").is_none());
    }
}
