//! Execution adapter: deletion strategies for condemned snapshots.
//!
//! The engine never knows whether it ran in live or dry-run mode; the mode
//! is the choice of deleter handed to `execute`. Deletions run one at a
//! time because the snapshot namespace is a shared mutable resource and the
//! underlying tools contend badly when raced.

use anyhow::{bail, Result};

use crate::engine::PrunePlan;
use crate::process::Cmd;
use crate::snapshot::Snapshot;

/// Filesystem backend whose tool performs the actual deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Zfs,
    Btrfs,
}

impl Backend {
    pub fn tool(&self) -> &'static str {
        match self {
            Backend::Zfs => "zfs",
            Backend::Btrfs => "btrfs",
        }
    }

    /// The live deleter for this backend.
    pub fn deleter(&self) -> Box<dyn SnapshotDeleter> {
        match self {
            Backend::Zfs => Box::new(ZfsDeleter),
            Backend::Btrfs => Box::new(BtrfsDeleter),
        }
    }
}

/// Strategy interface for the destructive step.
pub trait SnapshotDeleter {
    /// Issue one delete request for the snapshot, by stable identifier.
    fn destroy(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Deletes ZFS snapshots via `zfs destroy`.
pub struct ZfsDeleter;

impl SnapshotDeleter for ZfsDeleter {
    fn destroy(&self, snapshot: &Snapshot) -> Result<()> {
        Cmd::new("zfs")
            .arg("destroy")
            .arg(snapshot.name.as_str())
            .error_msg(format!("zfs destroy {} failed", snapshot.name))
            .run()?;
        Ok(())
    }
}

/// Deletes Btrfs snapshots via `btrfs subvolume delete`.
pub struct BtrfsDeleter;

impl SnapshotDeleter for BtrfsDeleter {
    fn destroy(&self, snapshot: &Snapshot) -> Result<()> {
        Cmd::new("btrfs")
            .args(["subvolume", "delete"])
            .arg(snapshot.name.as_str())
            .error_msg(format!("btrfs subvolume delete {} failed", snapshot.name))
            .run()?;
        Ok(())
    }
}

/// Dry-run deleter: touches nothing.
pub struct NoopDeleter;

impl SnapshotDeleter for NoopDeleter {
    fn destroy(&self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

/// Result of a deletion batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Delete every condemned snapshot in the plan, sequentially.
///
/// Per-item failures are logged and do not abort the batch; pruning one
/// snapshot never depends on another having gone first. The batch as a
/// whole fails only when every attempted deletion failed, which points at
/// a systemic problem (tool missing, no privileges) rather than a bad
/// individual snapshot.
pub fn execute(plan: &PrunePlan, deleter: &dyn SnapshotDeleter) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for item in plan.condemned() {
        outcome.attempted += 1;
        if let Err(e) = deleter.destroy(&item.snapshot) {
            eprintln!("[WARN] failed to delete {}: {:#}", item.snapshot.name, e);
            outcome.failed += 1;
        }
    }

    if outcome.attempted > 0 && outcome.failed == outcome.attempted {
        bail!("all {} snapshot deletions failed", outcome.attempted);
    }
    if outcome.failed > 0 {
        eprintln!(
            "[WARN] {} of {} snapshot deletions failed",
            outcome.failed, outcome.attempted
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::policy::RetentionPolicy;
    use std::cell::RefCell;

    const DAY: i64 = 86_400;
    const NOW: i64 = 1_700_000_000;

    /// Records destroy calls; fails on names listed in `fail_on`.
    struct RecordingDeleter {
        calls: RefCell<Vec<String>>,
        fail_on: Vec<String>,
    }

    impl RecordingDeleter {
        fn new(fail_on: &[&str]) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: fail_on.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl SnapshotDeleter for RecordingDeleter {
        fn destroy(&self, snapshot: &Snapshot) -> Result<()> {
            self.calls.borrow_mut().push(snapshot.name.as_str().to_string());
            if self.fail_on.iter().any(|n| n == snapshot.name.as_str()) {
                bail!("simulated tool failure");
            }
            Ok(())
        }
    }

    fn condemned_plan() -> PrunePlan {
        // keep_count 1, max_age 7: the three old snapshots are condemned.
        let snaps = vec![
            Snapshot::new("tank@old1", NOW - 400 * DAY).unwrap(),
            Snapshot::new("tank@old2", NOW - 300 * DAY).unwrap(),
            Snapshot::new("tank@old3", NOW - 200 * DAY).unwrap(),
            Snapshot::new("tank@new", NOW - DAY).unwrap(),
        ];
        let policy = RetentionPolicy::new(1, 7, NOW).unwrap();
        evaluate(snaps, &policy)
    }

    #[test]
    fn test_execute_deletes_each_condemned_exactly_once() {
        let plan = condemned_plan();
        let deleter = RecordingDeleter::new(&[]);
        let outcome = execute(&plan, &deleter).unwrap();

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failed, 0);
        assert_eq!(
            *deleter.calls.borrow(),
            vec!["tank@old1", "tank@old2", "tank@old3"]
        );
    }

    #[test]
    fn test_execute_never_touches_kept_snapshots() {
        let plan = condemned_plan();
        let deleter = RecordingDeleter::new(&[]);
        execute(&plan, &deleter).unwrap();
        assert!(!deleter.calls.borrow().iter().any(|n| n == "tank@new"));
    }

    #[test]
    fn test_partial_failure_continues_batch() {
        let plan = condemned_plan();
        let deleter = RecordingDeleter::new(&["tank@old2"]);
        let outcome = execute(&plan, &deleter).unwrap();

        // old3 still attempted after old2 failed.
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.succeeded(), 2);
        assert_eq!(deleter.calls.borrow().len(), 3);
    }

    #[test]
    fn test_total_failure_is_fatal() {
        let plan = condemned_plan();
        let deleter = RecordingDeleter::new(&["tank@old1", "tank@old2", "tank@old3"]);
        let err = execute(&plan, &deleter).unwrap_err();
        assert!(err.to_string().contains("all 3"));
    }

    #[test]
    fn test_empty_delete_set_is_success() {
        let snaps = vec![Snapshot::new("tank@new", NOW - DAY).unwrap()];
        let policy = RetentionPolicy::new(20, 180, NOW).unwrap();
        let plan = evaluate(snaps, &policy);
        let deleter = RecordingDeleter::new(&[]);
        let outcome = execute(&plan, &deleter).unwrap();
        assert_eq!(outcome.attempted, 0);
        assert!(deleter.calls.borrow().is_empty());
    }
}
