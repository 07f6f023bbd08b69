//! Retention policy model.
//!
//! The three tunables governing which snapshots survive a pruning pass.
//! Values arrive from CLI flags and the environment (see `config`); this
//! module owns validation and the defaults.

use anyhow::{bail, Result};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Minimum number of newest snapshots always retained.
pub const DEFAULT_KEEP_COUNT: i64 = 20;

/// Snapshots no older than this many days are retained regardless of count.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 180;

/// Validated retention configuration for one pruning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetentionPolicy {
    keep_count: u64,
    max_age_days: i64,
    reference_time: i64,
}

impl RetentionPolicy {
    /// Validate and build a policy.
    ///
    /// `keep_count == 0` is accepted and means no snapshot is protected
    /// purely by recency; negative values for either tunable are a
    /// configuration error.
    pub fn new(keep_count: i64, max_age_days: i64, reference_time: i64) -> Result<Self> {
        if keep_count < 0 {
            bail!("invalid keep count {keep_count}: must be zero or greater");
        }
        if max_age_days < 0 {
            bail!("invalid max age {max_age_days}: must be zero or greater");
        }
        if reference_time < 0 {
            bail!("invalid reference time {reference_time}: must be an epoch timestamp");
        }
        Ok(Self {
            keep_count: keep_count as u64,
            max_age_days,
            reference_time,
        })
    }

    pub fn keep_count(&self) -> u64 {
        self.keep_count
    }

    pub fn max_age_days(&self) -> i64 {
        self.max_age_days
    }

    /// The "now" instant used for age computation.
    pub fn reference_time(&self) -> i64 {
        self.reference_time
    }
}

/// Current wall-clock time in epoch seconds.
pub fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
