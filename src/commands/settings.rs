// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Theme;
use crate::tracker::Tracker;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(theme) = sub.get_one::<String>("theme") {
        tracker.set_theme(Theme::from(theme.clone()));
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        tracker.set_currency(ccy)?;
    }
    let s = tracker.settings();
    println!(
        "{}",
        pretty_table(
            &["Theme", "Currency"],
            vec![vec![s.theme.to_string(), s.currency.clone()]],
        )
    );
    Ok(())
}
