//! Calendar helpers for month and week windows

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("Day 1 always valid")
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// First day of the month `n` months before the one containing `date`
pub fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    month_start(date)
        .checked_sub_months(Months::new(n))
        .unwrap_or(NaiveDate::MIN)
}

/// First and last day of the calendar month preceding `date`'s month
pub fn previous_month(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = months_back(date, 1);
    (start, month_end(start))
}

/// Sunday-to-Saturday week containing `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_sunday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month_end(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(month_end(date(2023, 12, 5)), date(2023, 12, 31));
    }

    #[test]
    fn test_previous_month_rolls_over_year() {
        assert_eq!(
            previous_month(date(2025, 1, 10)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
        assert_eq!(
            previous_month(date(2025, 3, 31)),
            (date(2025, 2, 1), date(2025, 2, 28))
        );
    }

    #[test]
    fn test_months_back() {
        assert_eq!(months_back(date(2025, 3, 15), 5), date(2024, 10, 1));
        assert_eq!(months_back(date(2025, 3, 15), 0), date(2025, 3, 1));
    }

    #[test]
    fn test_week_bounds_start_sunday() {
        // 2025-06-18 is a Wednesday
        assert_eq!(
            week_bounds(date(2025, 6, 18)),
            (date(2025, 6, 15), date(2025, 6, 21))
        );
        // A Sunday starts its own week
        assert_eq!(week_bounds(date(2025, 6, 15)).0, date(2025, 6, 15));
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2025, 6, 14))); // Saturday
        assert!(is_weekend(date(2025, 6, 15))); // Sunday
        assert!(!is_weekend(date(2025, 6, 16))); // Monday
    }
}
