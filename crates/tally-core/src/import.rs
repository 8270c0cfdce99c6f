//! Expense ledger loading and saving
//!
//! Ledgers are JSON arrays (as returned by the expenses API) or CSV files
//! with a header row. Parsing is lenient at the field level: a value that
//! cannot be understood becomes `None` and the record is kept, so the
//! aggregations can still use whatever else it carries. Structural problems
//! (not an array, unreadable CSV) are errors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Category, Expense, PaymentMethod};

/// Supported ledger file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFormat {
    Json,
    Csv,
}

impl LedgerFormat {
    /// Detect format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Load expenses from a ledger file, choosing the parser by extension
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    let format = LedgerFormat::from_path(path).ok_or_else(|| {
        Error::Import(format!(
            "Unsupported ledger format: {} (expected .json or .csv)",
            path.display()
        ))
    })?;

    let file = File::open(path)?;
    let expenses = match format {
        LedgerFormat::Json => parse_json(file)?,
        LedgerFormat::Csv => parse_csv(file)?,
    };

    debug!(path = %path.display(), count = expenses.len(), "Loaded expenses");
    Ok(expenses)
}

/// Append one expense to a JSON ledger, returning the new record count
///
/// Existing entries are carried over as raw JSON, so fields this crate does
/// not model (ids, timestamps) and values it could not parse stay on disk.
/// A missing file starts a new ledger.
pub fn append_json(path: &Path, expense: &Expense) -> Result<usize> {
    let mut items = if path.exists() {
        match serde_json::from_reader::<_, Value>(File::open(path)?)? {
            Value::Array(items) => items,
            _ => return Err(Error::Import("Expected a JSON array of expenses".into())),
        }
    } else {
        Vec::new()
    };

    items.push(serde_json::to_value(expense)?);
    let count = items.len();
    write_json_atomic(path, &Value::Array(items))?;

    debug!(path = %path.display(), count, "Appended expense");
    Ok(count)
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, value)?;
    temp.write_all(b"\n")?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Parse a JSON array of expense objects
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = value else {
        return Err(Error::Import("Expected a JSON array of expenses".into()));
    };

    let mut expenses = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(map) => expenses.push(expense_from_json(index, map)),
            _ => warn!(index, "Skipping non-object ledger entry"),
        }
    }

    debug!("Parsed {} JSON expenses", expenses.len());
    Ok(expenses)
}

fn expense_from_json(index: usize, map: &serde_json::Map<String, Value>) -> Expense {
    let field = |camel: &str, snake: &str| map.get(camel).or_else(|| map.get(snake));
    let text = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let amount = match map.get("amount") {
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(|a| lenient(index, "amount", &n.to_string(), check_amount(a))),
        Some(Value::String(s)) => lenient(index, "amount", s, parse_amount(s)),
        _ => None,
    };

    let category = text("category").and_then(|s| {
        lenient(index, "category", &s, s.parse::<Category>().map_err(Error::InvalidData))
    });

    let date = text("date").and_then(|s| lenient(index, "date", &s, parse_date(&s)));

    let payment_method = field("paymentMethod", "payment_method")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| {
            lenient(
                index,
                "paymentMethod",
                s,
                s.parse::<PaymentMethod>().map_err(Error::InvalidData),
            )
        });

    let tags: Vec<String> = map
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let is_recurring = field("isRecurring", "is_recurring")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Expense {
        title: text("title"),
        amount,
        category,
        date,
        payment_method,
        location: text("location"),
        notes: text("notes"),
        tags,
        is_recurring,
    }
}

/// Parse a CSV ledger with a header row
///
/// Columns are matched by name, case-insensitively and in any order:
/// `title, amount, category, date, payment_method, location, notes, tags,
/// is_recurring`. Tags are separated by `;`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = column_index(&headers);
    if !columns.contains_key("amount") {
        return Err(Error::Import("CSV ledger has no amount column".into()));
    }

    let mut expenses = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let get = |name: &str| {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .filter(|s| !s.is_empty())
        };

        let amount = get("amount").and_then(|s| lenient(index, "amount", s, parse_amount(s)));
        let category = get("category").and_then(|s| {
            lenient(index, "category", s, s.parse::<Category>().map_err(Error::InvalidData))
        });
        let date = get("date").and_then(|s| lenient(index, "date", s, parse_date(s)));
        let payment_method = get("payment_method").and_then(|s| {
            lenient(
                index,
                "payment_method",
                s,
                s.parse::<PaymentMethod>().map_err(Error::InvalidData),
            )
        });
        let tags: Vec<String> = get("tags")
            .map(|s| {
                s.split(';')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let is_recurring = get("is_recurring")
            .map(|s| matches!(s.to_lowercase().as_str(), "true" | "yes" | "1"))
            .unwrap_or(false);

        expenses.push(Expense {
            title: get("title").map(String::from),
            amount,
            category,
            date,
            payment_method,
            location: get("location").map(String::from),
            notes: get("notes").map(String::from),
            tags,
            is_recurring,
        });
    }

    debug!("Parsed {} CSV expenses", expenses.len());
    Ok(expenses)
}

/// Map normalized header names to column positions
fn column_index(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let key = match h.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
                "paymentmethod" => "payment_method".to_string(),
                "isrecurring" | "recurring" => "is_recurring".to_string(),
                other => other.to_string(),
            };
            (key, i)
        })
        .collect()
}

/// Keep the parsed value, or log and drop the field
fn lenient<T>(index: usize, field: &str, raw: &str, parsed: Result<T>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(record = index, field, value = raw, error = %e, "Ignoring unparseable field");
            None
        }
    }
}

/// Parse a date in ISO, RFC 3339, or US format
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Ok(date);
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and separators
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s.trim().replace(['$', '₹', '€', '£', ',', ' '], "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))?;
    check_amount(amount)
}

/// Amounts are magnitudes: finite and not negative
fn check_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidData(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )))
    }
}
