//! Configuration management for snapkeep.
//!
//! Policy overrides are read from the environment (a `.env` file is loaded
//! into the environment at startup). Precedence, highest first: CLI flag,
//! environment variable, built-in default.

use anyhow::{Context, Result};

use crate::policy::{self, RetentionPolicy, DEFAULT_KEEP_COUNT, DEFAULT_MAX_AGE_DAYS};

pub const ENV_KEEP_COUNT: &str = "SNAPKEEP_KEEP_COUNT";
pub const ENV_MAX_AGE_DAYS: &str = "SNAPKEEP_MAX_AGE_DAYS";
/// Fixed "now" for deterministic runs; test harnesses set this.
pub const ENV_REFERENCE_TIME: &str = "SNAPKEEP_REFERENCE_TIME";

/// Environment-sourced policy overrides.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keep_count: Option<i64>,
    pub max_age_days: Option<i64>,
    pub reference_time: Option<i64>,
}

impl Config {
    /// Load overrides from the environment.
    ///
    /// A variable that is set but not an integer is a configuration error,
    /// fatal before any processing begins.
    pub fn load() -> Result<Self> {
        Ok(Self {
            keep_count: read_env_int(ENV_KEEP_COUNT)?,
            max_age_days: read_env_int(ENV_MAX_AGE_DAYS)?,
            reference_time: read_env_int(ENV_REFERENCE_TIME)?,
        })
    }

    /// Resolve the effective policy from CLI flags over these overrides
    /// over the defaults. Validation happens once, here.
    pub fn resolve_policy(
        &self,
        keep_count: Option<i64>,
        max_age_days: Option<i64>,
        reference_time: Option<i64>,
    ) -> Result<RetentionPolicy> {
        let keep_count = keep_count.or(self.keep_count).unwrap_or(DEFAULT_KEEP_COUNT);
        let max_age_days = max_age_days
            .or(self.max_age_days)
            .unwrap_or(DEFAULT_MAX_AGE_DAYS);
        let reference_time = reference_time
            .or(self.reference_time)
            .unwrap_or_else(policy::now_epoch);
        RetentionPolicy::new(keep_count, max_age_days, reference_time)
    }

    /// Print the override state for `show config`.
    pub fn print(&self) {
        println!("Configuration:");
        print_override(ENV_KEEP_COUNT, self.keep_count, DEFAULT_KEEP_COUNT);
        print_override(ENV_MAX_AGE_DAYS, self.max_age_days, DEFAULT_MAX_AGE_DAYS);
        match self.reference_time {
            Some(t) => println!("  {ENV_REFERENCE_TIME}: {t}"),
            None => println!("  {ENV_REFERENCE_TIME}: (unset, using current time)"),
        }
    }
}

fn print_override(name: &str, value: Option<i64>, default: i64) {
    match value {
        Some(v) => println!("  {name}: {v}"),
        None => println!("  {name}: (unset, default {default})"),
    }
}

fn read_env_int(name: &str) -> Result<Option<i64>> {
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{name}='{raw}' is not an integer"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
