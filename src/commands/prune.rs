//! Prune command - decision pass plus optional deletion.

use anyhow::Result;

use crate::config::Config;
use crate::deleter::{self, Backend, NoopDeleter, SnapshotDeleter};
use crate::engine;
use crate::feed;
use crate::report;

/// Resolved arguments for one prune run.
pub struct PruneArgs {
    /// Feed path, or `-` for stdin.
    pub input: String,
    /// Perform real deletions instead of the default dry run.
    pub live: bool,
    pub backend: Backend,
    pub keep_count: Option<i64>,
    pub max_age_days: Option<i64>,
    pub reference_time: Option<i64>,
    pub verbose: bool,
    pub json: bool,
}

/// Execute the prune command.
pub fn cmd_prune(args: &PruneArgs, config: &Config) -> Result<()> {
    let policy = config.resolve_policy(args.keep_count, args.max_age_days, args.reference_time)?;
    let feed = feed::read_feed(&args.input)?;
    let plan = engine::evaluate(feed.snapshots, &policy);

    if args.verbose {
        report::print_verbose(&plan);
    }
    if args.json {
        report::print_json(&plan)?;
    }
    // The summary goes out before any destructive step, so operators see
    // what should happen even if deletions later fail.
    println!("{}", report::summary_line(&plan));

    let deleter: Box<dyn SnapshotDeleter> = if args.live {
        args.backend.deleter()
    } else {
        Box::new(NoopDeleter)
    };
    let outcome = deleter::execute(&plan, deleter.as_ref())?;

    if args.live {
        println!(
            "Pruned {} snapshots via {}.",
            outcome.succeeded(),
            args.backend.tool()
        );
    } else if outcome.attempted > 0 {
        println!("Dry run: {} snapshots would be deleted.", outcome.attempted);
    } else {
        println!("Dry run: nothing to delete.");
    }

    Ok(())
}
