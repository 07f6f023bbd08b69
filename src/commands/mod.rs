//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `prune` - Run the decision pass and (in live mode) delete
//! - `show` - Display information
//! - `preflight` - Verify backend tools before a live run

pub mod preflight;
pub mod prune;
pub mod show;

pub use preflight::cmd_preflight;
pub use prune::{cmd_prune, PruneArgs};
pub use show::{cmd_show, ShowTarget};
