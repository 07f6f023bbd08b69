//! Snapshot identity and record model.
//!
//! A snapshot arrives from the lister as an opaque name plus a creation
//! timestamp. The name is decoded into a dataset/label pair so that genesis
//! protection is a typed predicate instead of string matching at call sites.

use anyhow::{bail, Context, Result};
use serde::{Serialize, Serializer};

/// Label of the permanently protected first-boot snapshot.
pub const GENESIS_LABEL: &str = "genesis";

/// Decoded snapshot identifier.
///
/// ZFS snapshots are `dataset@label`; Btrfs snapshots are plain subvolume
/// paths whose last segment is the label. The raw string is preserved
/// unchanged because deletion addresses snapshots by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotName {
    raw: String,
    /// Byte offset where the label component starts within `raw`.
    label_start: usize,
}

impl SnapshotName {
    /// Decode a raw identifier.
    ///
    /// The label is everything after the last `@` (ZFS), falling back to
    /// the last `/` (Btrfs path), falling back to the whole string.
    pub fn parse(raw: &str) -> Self {
        let label_start = raw
            .rfind('@')
            .or_else(|| raw.rfind('/'))
            .map(|sep| sep + 1)
            .unwrap_or(0);
        Self {
            raw: raw.to_string(),
            label_start,
        }
    }

    /// The full identifier as supplied by the lister.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Dataset (ZFS) or parent path (Btrfs) component, if any.
    pub fn dataset(&self) -> Option<&str> {
        if self.label_start == 0 {
            None
        } else {
            // Strip the separator itself.
            Some(&self.raw[..self.label_start - 1])
        }
    }

    /// Trailing label component examined for genesis protection.
    pub fn label(&self) -> &str {
        &self.raw[self.label_start..]
    }

    /// True iff the label is exactly `genesis` (case-sensitive).
    pub fn is_genesis(&self) -> bool {
        self.label() == GENESIS_LABEL
    }
}

impl std::fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for SnapshotName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// One snapshot record from the lister feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub name: SnapshotName,
    /// Creation time in seconds since the epoch.
    pub created_at: i64,
}

impl Snapshot {
    /// Construct a record, rejecting invalid timestamps.
    pub fn new(name: &str, created_at: i64) -> Result<Self> {
        if created_at < 0 {
            bail!("negative creation timestamp {created_at} for '{name}'");
        }
        Ok(Self {
            name: SnapshotName::parse(name),
            created_at,
        })
    }

    /// Parse one feed line: `<name><whitespace><epoch-seconds>`.
    ///
    /// This is the shape of `zfs list -Hp -t snapshot -o name,creation`
    /// output. Names may contain internal whitespace; the timestamp is the
    /// final field.
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, ts) = line
            .rsplit_once(|c: char| c.is_whitespace())
            .with_context(|| format!("missing creation timestamp in '{line}'"))?;
        let name = name.trim_end();
        if name.is_empty() {
            bail!("missing snapshot name in '{line}'");
        }
        let created_at: i64 = ts
            .parse()
            .with_context(|| format!("bad creation timestamp '{ts}' for '{name}'"))?;
        Self::new(name, created_at)
    }

    /// Whole days elapsed between creation and `reference_time`.
    ///
    /// Saturates at zero so a snapshot stamped at or after the reference
    /// instant counts as brand new rather than negatively aged.
    pub fn age_days(&self, reference_time: i64) -> i64 {
        (reference_time - self.created_at).max(0) / 86_400
    }
}
