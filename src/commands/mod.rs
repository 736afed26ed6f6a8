// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod settings;
pub mod shell;

use anyhow::Result;

use crate::tracker::Tracker;

/// Routes one parsed command line to its handler. Returns `false` when no
/// subcommand matched.
pub fn dispatch(tracker: &mut Tracker, matches: &clap::ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("add", sub)) => transactions::add(tracker, sub)?,
        Some(("list", sub)) => transactions::list(tracker, sub)?,
        Some(("rm", sub)) => transactions::rm(tracker, sub)?,
        Some(("undo", _)) => transactions::undo(tracker)?,
        Some(("reset", sub)) => transactions::reset(tracker, sub)?,
        Some(("totals", sub)) => reports::totals(tracker, sub)?,
        Some(("dashboard", sub)) => reports::dashboard(tracker, sub)?,
        Some(("breakdown", sub)) => reports::breakdown(tracker, sub)?,
        Some(("categories", sub)) => reports::categories(tracker, sub)?,
        Some(("trend", sub)) => reports::trend(tracker, sub)?,
        Some(("stats", sub)) => reports::stats(tracker, sub)?,
        Some(("export", sub)) => {
            exporter::handle(tracker, sub)?;
        }
        Some(("import", sub)) => importer::handle(tracker, sub)?,
        Some(("settings", sub)) => settings::handle(tracker, sub)?,
        _ => return Ok(false),
    }
    Ok(true)
}
