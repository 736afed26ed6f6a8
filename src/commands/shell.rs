// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented session. Keeps one tracker alive so that `rm` followed by
//! `undo` works within the undo window.

use anyhow::Result;
use std::io::{self, Write};

use crate::cli;
use crate::commands::dispatch;
use crate::tracker::Tracker;

const PROMPT: &str = "pennywise> ";

pub fn run(tracker: &mut Tracker) -> Result<()> {
    println!("Type `help` for commands, `exit` to leave.");
    // Lock stdin per line; confirmation prompts read from it too.
    let lines = std::iter::from_fn(|| {
        print!("{}", PROMPT);
        if let Err(err) = io::stdout().flush() {
            return Some(Err(err));
        }
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(buf)),
            Err(err) => Some(Err(err)),
        }
    });
    run_lines(tracker, lines)
}

/// Executes each line as a command. Command errors are printed and the
/// session continues; only input errors end it.
pub fn run_lines<I>(tracker: &mut Tracker, lines: I) -> Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    for line in lines {
        let line = line?;
        let line = line.trim();

        if let Some(gone) = tracker.tick() {
            println!("'{}' deleted permanently", gone.title);
        }

        match line {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                cli::build_cli().print_help()?;
                println!();
                continue;
            }
            _ => {}
        }

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(err) => {
                println!("Error: {}", err);
                continue;
            }
        };
        if words.first().map(String::as_str) == Some("shell") {
            println!("Already in a shell");
            continue;
        }

        let args = std::iter::once("pennywise".to_string()).chain(words);
        let matches = match cli::build_cli().try_get_matches_from(args) {
            Ok(m) => m,
            Err(err) => {
                let _ = err.print();
                continue;
            }
        };
        match dispatch(tracker, &matches) {
            Ok(true) => {}
            Ok(false) => println!("Unknown command; type `help`"),
            Err(err) => {
                tracing::debug!(error = %err, "command failed");
                println!("Error: {:#}", err);
            }
        }
    }
    Ok(())
}
