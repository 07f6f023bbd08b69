//! Preflight command - runs preflight checks.

use anyhow::Result;

use crate::deleter::Backend;
use crate::preflight;

/// Execute the preflight command.
pub fn cmd_preflight(backend: Backend, strict: bool) -> Result<()> {
    if strict {
        preflight::run_preflight_or_fail(backend)?;
    } else {
        let report = preflight::run_preflight(backend);
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the run.");
        }
    }
    Ok(())
}
