//! Insights configuration
//!
//! Controls currency formatting and the tunable thresholds of the insights
//! engine.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (`--config`), which must exist
//! 2. The user override (~/.config/tally/insights.toml) if present
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::currency::{CurrencyFormat, DigitGrouping};
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Tunables for insight generation
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    /// How amounts are rendered in generated text
    pub currency: CurrencyFormat,
    /// Month total above which savings advice switches to high-yield accounts
    pub high_spend_threshold: f64,
    /// Daily average that raises a daily-limit concern
    pub daily_spend_threshold: f64,
    /// Month-over-month increase ratio that raises a concern
    pub increase_concern_ratio: f64,
    pub max_patterns: usize,
    pub max_suggestions: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            high_spend_threshold: 10_000.0,
            daily_spend_threshold: 500.0,
            increase_concern_ratio: 0.3,
            max_patterns: 4,
            max_suggestions: 4,
        }
    }
}

impl InsightsConfig {
    /// Same defaults with a different currency
    pub fn with_currency(currency: CurrencyFormat) -> Self {
        Self {
            currency,
            ..Default::default()
        }
    }
}

/// Where a configuration was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl ConfigSource {
    /// Pick the config source for an optional explicit path
    pub fn resolve(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::File(path.to_path_buf()));
        }

        match default_config_path() {
            Some(path) if path.exists() => Ok(Self::File(path)),
            _ => Ok(Self::Embedded),
        }
    }

    pub fn load(&self) -> Result<InsightsConfig> {
        match self {
            Self::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), "Loading insights config");
                parse_config(&content)
            }
            Self::Embedded => parse_config(DEFAULT_CONFIG),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "(built-in defaults)"),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("insights.toml"))
}

/// Load configuration (explicit path, then user override, then defaults)
pub fn load_config(override_path: Option<&Path>) -> Result<InsightsConfig> {
    ConfigSource::resolve(override_path)?.load()
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    currency: Option<RawCurrency>,
    thresholds: Option<RawThresholds>,
    limits: Option<RawLimits>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    symbol: Option<String>,
    grouping: Option<String>,
    separator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_spend: Option<f64>,
    daily_spend: Option<f64>,
    increase_concern_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLimits {
    max_patterns: Option<usize>,
    max_suggestions: Option<usize>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(currency) = raw.currency {
        if let Some(symbol) = currency.symbol {
            config.currency.symbol = symbol;
        }
        if let Some(grouping) = currency.grouping {
            config.currency.grouping = grouping
                .parse::<DigitGrouping>()
                .map_err(Error::Config)?;
        }
        if let Some(separator) = currency.separator {
            let mut chars = separator.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => config.currency.separator = c,
                _ => {
                    return Err(Error::Config(format!(
                        "Separator must be a single character, got {:?}",
                        separator
                    )))
                }
            }
        }
    }

    if let Some(thresholds) = raw.thresholds {
        if let Some(v) = thresholds.high_spend {
            config.high_spend_threshold = non_negative("high_spend", v)?;
        }
        if let Some(v) = thresholds.daily_spend {
            config.daily_spend_threshold = non_negative("daily_spend", v)?;
        }
        if let Some(v) = thresholds.increase_concern_ratio {
            config.increase_concern_ratio = non_negative("increase_concern_ratio", v)?;
        }
    }

    if let Some(limits) = raw.limits {
        if let Some(n) = limits.max_patterns {
            config.max_patterns = n;
        }
        if let Some(n) = limits.max_suggestions {
            config.max_suggestions = n;
        }
    }

    Ok(config)
}

fn non_negative(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}
