//! Snapshot feed ingestion.
//!
//! The lister collaborator hands us lines of `<name> <epoch-seconds>`,
//! oldest-first. Malformed lines are skipped with a warning rather than
//! aborting the run; an input that yields no valid records at all while
//! containing malformed ones is treated as a broken stream and is fatal.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::snapshot::Snapshot;

/// Parsed feed plus a count of lines that had to be skipped.
#[derive(Debug)]
pub struct Feed {
    pub snapshots: Vec<Snapshot>,
    pub malformed: usize,
}

/// Read the feed from a file path, or stdin when `input` is `-`.
///
/// Fails if the stream produced no valid records but at least one
/// malformed line, which means the lister output is not in the expected
/// shape at all.
pub fn read_feed(input: &str) -> Result<Feed> {
    let feed = if input == "-" {
        parse_feed(io::stdin().lock())?
    } else {
        let path = Path::new(input);
        let file = File::open(path)
            .with_context(|| format!("cannot open snapshot feed {}", path.display()))?;
        parse_feed(BufReader::new(file))?
    };

    if feed.snapshots.is_empty() && feed.malformed > 0 {
        bail!(
            "snapshot feed contained no valid records ({} malformed lines)",
            feed.malformed
        );
    }

    Ok(feed)
}

/// Parse feed lines from any reader.
///
/// Blank lines and `#` comments are ignored. The oldest-first ordering is
/// a precondition of the decision engine; if the feed violates it the
/// records are re-sorted (stably, so equal timestamps keep input order)
/// after a warning instead of silently misranking everything downstream.
pub fn parse_feed<R: BufRead>(reader: R) -> Result<Feed> {
    let mut snapshots = Vec::new();
    let mut malformed = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed reading snapshot feed")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match Snapshot::parse_line(trimmed) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                eprintln!("[WARN] skipping feed line {}: {:#}", idx + 1, e);
                malformed += 1;
            }
        }
    }

    let sorted = snapshots
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at);
    if !sorted {
        eprintln!("[WARN] snapshot feed is not oldest-first; re-sorting by creation time");
        snapshots.sort_by_key(|s| s.created_at);
    }

    Ok(Feed {
        snapshots,
        malformed,
    })
}
