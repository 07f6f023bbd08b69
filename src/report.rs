//! Decision reporting.
//!
//! The single `RESULT:` line is a stable contract parsed by the automated
//! test harness; its shape must not change. Verbose and JSON output are
//! for humans and richer tooling respectively.

use anyhow::Result;
use serde::Serialize;

use crate::engine::{Decision, PlanItem, PrunePlan};

/// Machine-parseable aggregate summary. Stable format, do not reword.
pub fn summary_line(plan: &PrunePlan) -> String {
    format!("RESULT:kept={},deleted={}", plan.kept(), plan.deleted())
}

/// Per-snapshot listing for `--verbose`.
pub fn print_verbose(plan: &PrunePlan) {
    if plan.items.is_empty() {
        println!("No snapshots in feed.");
        return;
    }

    let name_width = plan
        .items
        .iter()
        .map(|i| i.snapshot.name.as_str().len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!("{:<name_width$}  {:>8}  {:>5}  DECISION", "NAME", "AGE", "RANK");
    for item in &plan.items {
        let decision = match item.decision {
            Decision::Keep if item.genesis => "KEEP (genesis)",
            Decision::Keep => "KEEP",
            Decision::Delete => "DELETE",
        };
        println!(
            "{:<name_width$}  {:>7}d  {:>5}  {}",
            item.snapshot.name.as_str(),
            item.age_days,
            item.rank,
            decision
        );
    }
    println!();
}

#[derive(Serialize)]
struct JsonReport<'a> {
    kept: usize,
    deleted: usize,
    snapshots: &'a [PlanItem],
}

/// Emit the full decision set as pretty-printed JSON for `--json`.
pub fn print_json(plan: &PrunePlan) -> Result<()> {
    let doc = JsonReport {
        kept: plan.kept(),
        deleted: plan.deleted(),
        snapshots: &plan.items,
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
