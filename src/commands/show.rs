//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration and the effective policy
    Config,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
            let policy = config.resolve_policy(None, None, None)?;
            println!();
            println!("Effective policy:");
            println!("  keep_count: {}", policy.keep_count());
            println!("  max_age_days: {}", policy.max_age_days());
            println!("  reference_time: {}", policy.reference_time());
        }
    }
    Ok(())
}
