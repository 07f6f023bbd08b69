//! Configuration and policy resolution tests.
//!
//! Environment variables are process-global, so every test that touches
//! them is serialized.

use serial_test::serial;

use snapkeep::config::{Config, ENV_KEEP_COUNT, ENV_MAX_AGE_DAYS, ENV_REFERENCE_TIME};

fn clear_env() {
    std::env::remove_var(ENV_KEEP_COUNT);
    std::env::remove_var(ENV_MAX_AGE_DAYS);
    std::env::remove_var(ENV_REFERENCE_TIME);
}

#[test]
#[serial]
fn test_defaults_when_nothing_is_set() {
    clear_env();
    let config = Config::load().unwrap();
    let policy = config.resolve_policy(None, None, None).unwrap();
    assert_eq!(policy.keep_count(), 20);
    assert_eq!(policy.max_age_days(), 180);
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    std::env::set_var(ENV_KEEP_COUNT, "5");
    std::env::set_var(ENV_MAX_AGE_DAYS, "30");
    std::env::set_var(ENV_REFERENCE_TIME, "1700000000");

    let config = Config::load().unwrap();
    let policy = config.resolve_policy(None, None, None).unwrap();
    assert_eq!(policy.keep_count(), 5);
    assert_eq!(policy.max_age_days(), 30);
    assert_eq!(policy.reference_time(), 1_700_000_000);

    clear_env();
}

#[test]
#[serial]
fn test_cli_flags_override_env() {
    clear_env();
    std::env::set_var(ENV_KEEP_COUNT, "5");
    std::env::set_var(ENV_MAX_AGE_DAYS, "30");

    let config = Config::load().unwrap();
    let policy = config.resolve_policy(Some(3), Some(7), Some(1_700_000_000)).unwrap();
    assert_eq!(policy.keep_count(), 3);
    assert_eq!(policy.max_age_days(), 7);

    clear_env();
}

#[test]
#[serial]
fn test_reference_time_env_makes_runs_reproducible() {
    clear_env();
    std::env::set_var(ENV_REFERENCE_TIME, "1600000000");

    let config = Config::load().unwrap();
    let first = config.resolve_policy(None, None, None).unwrap();
    let second = config.resolve_policy(None, None, None).unwrap();
    assert_eq!(first.reference_time(), 1_600_000_000);
    assert_eq!(first, second);

    clear_env();
}

#[test]
#[serial]
fn test_non_integer_env_value_is_fatal() {
    clear_env();
    std::env::set_var(ENV_KEEP_COUNT, "twenty");

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains(ENV_KEEP_COUNT));

    clear_env();
}

#[test]
#[serial]
fn test_negative_env_policy_is_rejected_at_resolution() {
    clear_env();
    std::env::set_var(ENV_KEEP_COUNT, "-3");

    let config = Config::load().unwrap();
    let err = config.resolve_policy(None, None, None).unwrap_err();
    assert!(err.to_string().contains("keep count"));

    clear_env();
}
