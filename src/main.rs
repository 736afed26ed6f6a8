// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use pennywise::{cli, commands, store, tracker::Tracker, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = store::open_file_store(matches.get_one::<PathBuf>("data-dir").cloned())?;
    let mut tracker = Tracker::open(store);

    match matches.subcommand() {
        Some(("shell", _)) => commands::shell::run(&mut tracker)?,
        _ => {
            if !commands::dispatch(&mut tracker, &matches)? {
                cli::build_cli().print_help()?;
                println!();
            }
        }
    }
    Ok(())
}
