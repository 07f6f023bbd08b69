//! Preflight checks for the pruning tool.
//!
//! Validates that the selected backend's host tool is present and
//! responsive before a live run is attempted. Run with `snapkeep preflight`.

use anyhow::{bail, Result};

use crate::deleter::Backend;
use crate::process::Cmd;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

impl CheckResult {
    fn pass_with(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: Some(details.to_string()),
        }
    }

    fn fail(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            details: Some(details.to_string()),
        }
    }

    fn warn(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            details: Some(details.to_string()),
        }
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// True if no check failed.
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let status_str = match check.status {
                CheckStatus::Pass => "PASS",
                CheckStatus::Fail => "FAIL",
                CheckStatus::Warn => "WARN",
            };
            print!("  [{}] {}", status_str, check.name);
            match &check.details {
                Some(details) => println!(": {}", details),
                None => println!(),
            }
        }

        let total = self.checks.len();
        let passed = self
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        println!("\nSummary: {}/{} passed", passed, total);
    }
}

/// Run all preflight checks for the selected backend.
pub fn run_preflight(backend: Backend) -> PreflightReport {
    let tool = backend.tool();
    let mut checks = Vec::new();

    match which::which(tool) {
        Ok(path) => {
            checks.push(CheckResult::pass_with(tool, &path.display().to_string()));
            checks.push(check_tool_responds(backend));
        }
        Err(_) => {
            checks.push(CheckResult::fail(
                tool,
                &format!("not found in PATH. Install the {tool} userspace tools."),
            ));
        }
    }

    PreflightReport { checks }
}

/// Run preflight and fail on any unmet requirement.
pub fn run_preflight_or_fail(backend: Backend) -> Result<()> {
    let report = run_preflight(backend);
    report.print();
    if !report.all_passed() {
        bail!("preflight checks failed for backend '{}'", backend.tool());
    }
    Ok(())
}

/// Probe the tool with its version subcommand.
///
/// Both `zfs version` and `btrfs version` work unprivileged, so a failure
/// here means a broken installation, not missing root.
fn check_tool_responds(backend: Backend) -> CheckResult {
    let tool = backend.tool();
    let name = format!("{tool} version");
    match Cmd::new(tool).arg("version").allow_fail().run() {
        Ok(result) if result.success() => {
            let first_line = result.stdout_trimmed().lines().next().unwrap_or("").to_string();
            CheckResult::pass_with(&name, &first_line)
        }
        Ok(result) => CheckResult::warn(
            &name,
            &format!("exited with code {}", result.code()),
        ),
        Err(e) => CheckResult::fail(&name, &format!("{e:#}")),
    }
}
