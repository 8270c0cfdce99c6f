//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (ledger/config loading, date parsing) and the config command
//! - `expenses` - Expense commands (list, add)
//! - `insights` - Insight report command
//! - `reports` - Dashboard and analytics commands

pub mod core;
pub mod expenses;
pub mod insights;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use expenses::*;
pub use insights::*;
pub use reports::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
