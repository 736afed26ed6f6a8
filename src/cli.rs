// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::aggregate::MAX_TREND_DAYS;

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Reference day (defaults to today, UTC)")
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .about("Personal income/expense ledger")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the ledger files"),
        )
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("title").required(true))
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Positive amount; direction comes from --income/--expense"),
                )
                .arg(
                    Arg::new("income")
                        .long("income")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("expense"),
                )
                .arg(
                    Arg::new("expense")
                        .long("expense")
                        .action(ArgAction::SetTrue)
                        .help("Default when neither flag is given"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .default_value("other"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(Arg::new("category").long("category").short('c'))
                .args(json_args()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction (undoable for a few seconds in the shell)")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(Command::new("undo").about("Restore the last deleted transaction"))
        .subcommand(
            Command::new("totals")
                .about("Income, expense and balance")
                .args(json_args()),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Totals, recent activity, top categories, trend and stats")
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("breakdown")
                .about("Expense share per category")
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("categories")
                .about("Income, expense and count for every category")
                .args(json_args()),
        )
        .subcommand(
            Command::new("trend")
                .about("Daily expense over the last N days")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32).range(1..=i64::from(MAX_TREND_DAYS)))
                        .default_value("7"),
                )
                .arg(as_of_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("stats")
                .about("Month total, average transaction and count")
                .arg(as_of_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Write a JSON backup")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output path (defaults to expense-tracker-backup-<date>.json)"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data with a JSON backup")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete every transaction")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .value_parser(["light", "dark"]),
                )
                .arg(Arg::new("currency").long("currency")),
        )
        .subcommand(Command::new("shell").about("Interactive session"))
}
