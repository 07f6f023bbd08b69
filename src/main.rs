//! Snapkeep - snapshot retention tool for ZFS/Btrfs root installs.
//!
//! Decides which snapshots survive pruning under a keep-count/max-age
//! policy with a permanently protected genesis snapshot, then deletes the
//! rest in live mode. Dry-run by default.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use snapkeep::commands;
use snapkeep::config::Config;
use snapkeep::deleter::Backend;

#[derive(Parser)]
#[command(name = "snapkeep")]
#[command(about = "Snapshot retention tool for ZFS/Btrfs root installs")]
#[command(
    after_help = "QUICK START:\n  snapkeep preflight                 Check backend tools\n  zfs list -Hp -t snapshot -o name,creation -s creation | snapkeep prune\n                                     Decide, delete nothing\n  ... | snapkeep prune --live        Decide and delete"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide which snapshots to prune (dry-run unless --live)
    Prune {
        /// Snapshot feed file, or - for stdin (oldest-first `name timestamp` lines)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Perform real deletions via the backend tool
        #[arg(long)]
        live: bool,

        /// Filesystem backend used for live deletions
        #[arg(long, value_enum, default_value = "zfs")]
        backend: BackendArg,

        /// Minimum number of newest snapshots always retained (default: 20)
        #[arg(long)]
        keep_count: Option<i64>,

        /// Snapshots no older than this many days are retained (default: 180)
        #[arg(long)]
        max_age_days: Option<i64>,

        /// Fixed "now" in epoch seconds, for reproducible runs
        #[arg(long)]
        reference_time: Option<i64>,

        /// Print a per-snapshot decision listing
        #[arg(short, long)]
        verbose: bool,

        /// Emit the full decision set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Run preflight checks (verify backend tools before a live run)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,

        /// Filesystem backend to check
        #[arg(long, value_enum, default_value = "zfs")]
        backend: BackendArg,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration and the effective policy
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Zfs,
    Btrfs,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Zfs => Backend::Zfs,
            BackendArg::Btrfs => Backend::Btrfs,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    match cli.command {
        Commands::Prune {
            input,
            live,
            backend,
            keep_count,
            max_age_days,
            reference_time,
            verbose,
            json,
        } => {
            let args = commands::PruneArgs {
                input,
                live,
                backend: backend.into(),
                keep_count,
                max_age_days,
                reference_time,
                verbose,
                json,
            };
            commands::cmd_prune(&args, &config)?;
        }

        Commands::Show { what } => {
            let target = match what {
                ShowTarget::Config => commands::ShowTarget::Config,
            };
            commands::cmd_show(target, &config)?;
        }

        Commands::Preflight { strict, backend } => {
            commands::cmd_preflight(backend.into(), strict)?;
        }
    }

    Ok(())
}
