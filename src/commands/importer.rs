// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::parse_import;
use crate::tracker::Tracker;
use crate::utils::confirm;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn handle(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<PathBuf>("path").context("path missing")?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Open backup {}", path.display()))?;
    // Structural problems abort here, before anything is replaced.
    let doc = parse_import(&text).with_context(|| format!("Import {}", path.display()))?;

    if !sub.get_flag("yes")
        && !confirm(
            "This will replace all current data with the imported backup. \
             Consider exporting your current data first. Continue?",
        )?
    {
        println!("Import cancelled");
        return Ok(());
    }

    let kept = tracker.import(doc);
    println!("Imported {} transactions from {}", kept, path.display());
    Ok(())
}
