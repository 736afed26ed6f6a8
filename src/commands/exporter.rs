// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::export_file_name;
use crate::tracker::Tracker;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Writes the backup and returns where it went.
pub fn handle(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let out = sub
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(export_file_name(tracker.today())));

    let doc = tracker.export_document();
    let json = doc.to_pretty_json()?;
    std::fs::write(&out, json).with_context(|| format!("Write backup to {}", out.display()))?;
    println!(
        "Exported {} transactions to {}",
        doc.transactions.len(),
        out.display()
    );
    Ok(out)
}
