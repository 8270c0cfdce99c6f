//! Currency formatting for generated text
//!
//! Insight sentences always embed formatted amounts. The symbol and digit
//! grouping are configurable so the same engine can speak rupees with
//! lakh grouping (`₹1,23,457`) or dollars with thousands (`$123,457`).

use serde::{Deserialize, Serialize};

/// How integer digits are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Groups of three: 1,234,567
    Western,
    /// Last three, then groups of two: 12,34,567
    Indian,
}

impl DigitGrouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Western => "western",
            Self::Indian => "indian",
        }
    }
}

impl std::str::FromStr for DigitGrouping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "western" | "thousands" => Ok(Self::Western),
            "indian" | "lakh" => Ok(Self::Indian),
            _ => Err(format!(
                "Unknown digit grouping: {} (valid: western, indian)",
                s
            )),
        }
    }
}

/// Currency symbol plus grouping rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
    pub separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::inr()
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
            separator: ',',
        }
    }

    /// Indian rupee with lakh grouping
    pub fn inr() -> Self {
        Self::new("₹", DigitGrouping::Indian)
    }

    /// US dollar with thousands grouping
    pub fn usd() -> Self {
        Self::new("$", DigitGrouping::Western)
    }

    /// Format rounded to whole units, e.g. `₹1,23,457`
    pub fn format_whole(&self, amount: f64) -> String {
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        format!("{}{}{}", sign, self.symbol, self.group(&digits))
    }

    /// Format with two decimal places, e.g. `$1,234.50`
    pub fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let fixed = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!(
            "{}{}{}.{}",
            sign,
            self.symbol,
            self.group(int_part),
            frac_part
        )
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.len();
        if len <= 3 {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(len - 3);
        let head_groups: Vec<&str> = match self.grouping {
            DigitGrouping::Western => chunk_from_right(head, 3),
            DigitGrouping::Indian => chunk_from_right(head, 2),
        };

        let mut out = head_groups.join(&self.separator.to_string());
        out.push(self.separator);
        out.push_str(tail);
        out
    }
}

/// Split an ASCII digit string into chunks of `size`, aligned to the right
fn chunk_from_right(digits: &str, size: usize) -> Vec<&str> {
    let first = digits.len() % size;
    let mut chunks = Vec::new();
    if first > 0 {
        chunks.push(&digits[..first]);
    }
    let mut i = first;
    while i < digits.len() {
        chunks.push(&digits[i..i + size]);
        i += size;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        let fmt = CurrencyFormat::inr();
        assert_eq!(fmt.format_whole(0.0), "₹0");
        assert_eq!(fmt.format_whole(999.4), "₹999");
        assert_eq!(fmt.format_whole(1000.0), "₹1,000");
        assert_eq!(fmt.format_whole(123456.7), "₹1,23,457");
        assert_eq!(fmt.format_whole(12345678.0), "₹1,23,45,678");
    }

    #[test]
    fn test_western_grouping() {
        let fmt = CurrencyFormat::usd();
        assert_eq!(fmt.format_whole(1234567.0), "$1,234,567");
        assert_eq!(fmt.format_whole(123456.0), "$123,456");
        assert_eq!(fmt.format_amount(1234.5), "$1,234.50");
        assert_eq!(fmt.format_amount(-4.5), "-$4.50");
    }

    #[test]
    fn test_half_rounds_up() {
        let fmt = CurrencyFormat::usd();
        assert_eq!(fmt.format_whole(2.5), "$3");
        assert_eq!(fmt.format_whole(1999.5), "$2,000");
    }

    #[test]
    fn test_grouping_from_str() {
        assert_eq!(
            "Lakh".parse::<DigitGrouping>().unwrap(),
            DigitGrouping::Indian
        );
        assert!("metric".parse::<DigitGrouping>().is_err());
    }
}
