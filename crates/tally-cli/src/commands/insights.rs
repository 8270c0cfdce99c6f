//! Insight report command

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{InsightEngine, InsightsReport};

use super::{load_settings, open_ledger};

pub fn cmd_insights(
    ledger: &Path,
    config_path: Option<&Path>,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let expenses = open_ledger(ledger)?;
    let engine = InsightEngine::with_config(load_settings(config_path)?);
    let report = engine.generate(&expenses, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render_report(&report, date));
    Ok(())
}

/// Human-readable rendering of an insights report
pub fn render_report(report: &InsightsReport, date: NaiveDate) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("💡 Spending Insights (as of {})\n", date));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!("   {}\n", report.summary));

    let sections = [
        ("🔍 Patterns", &report.patterns),
        ("✅ Suggestions", &report.suggestions),
        ("📋 Budget Tips", &report.budget_tips),
        ("⚠️  Concerns", &report.concerns),
    ];

    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(&format!("{}\n", title));
        for item in items {
            out.push_str(&format!("   • {}\n", item));
        }
    }

    out
}
