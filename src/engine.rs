//! Retention decision engine.
//!
//! One pass over an oldest-first snapshot sequence, producing exactly one
//! decision per snapshot. Pure: no I/O, no hidden state, identical input
//! and policy always yield identical output. Nothing here deletes anything;
//! the execution adapter acts on the plan afterwards.

use serde::Serialize;

use crate::policy::RetentionPolicy;
use crate::snapshot::Snapshot;

/// Outcome for a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Delete,
}

/// A snapshot together with the attributes the decision was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct PlanItem {
    pub snapshot: Snapshot,
    /// 1-based position counting from the newest snapshot.
    pub rank: u64,
    pub age_days: i64,
    pub genesis: bool,
    pub decision: Decision,
}

/// Complete decision set for one pruning pass, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct PrunePlan {
    pub items: Vec<PlanItem>,
}

impl PrunePlan {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn kept(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.decision == Decision::Keep)
            .count()
    }

    pub fn deleted(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.decision == Decision::Delete)
            .count()
    }

    /// Items condemned to deletion, in input order.
    pub fn condemned(&self) -> impl Iterator<Item = &PlanItem> {
        self.items
            .iter()
            .filter(|i| i.decision == Decision::Delete)
    }
}

/// Decide the fate of every snapshot in one pass.
///
/// Input must be ordered oldest-first (the feed layer guarantees this).
/// Rank is assigned positionally from the end, so equal timestamps are
/// broken by input order: the later element counts as newer.
///
/// A snapshot is kept if ANY of these hold:
/// - it is among the `keep_count` most recent (`rank <= keep_count`)
/// - it is not yet old enough to prune (`age_days <= max_age_days`)
/// - it is the genesis snapshot
///
/// Both boundaries are inclusive.
pub fn evaluate(snapshots: Vec<Snapshot>, policy: &RetentionPolicy) -> PrunePlan {
    let total = snapshots.len();
    let items = snapshots
        .into_iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let rank = (total - index) as u64;
            let age_days = snapshot.age_days(policy.reference_time());
            let genesis = snapshot.name.is_genesis();

            let keep = rank <= policy.keep_count()
                || age_days <= policy.max_age_days()
                || genesis;

            PlanItem {
                snapshot,
                rank,
                age_days,
                genesis,
                decision: if keep { Decision::Keep } else { Decision::Delete },
            }
        })
        .collect();

    PrunePlan { items }
}
