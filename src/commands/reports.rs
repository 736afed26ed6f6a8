// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, Breakdown};
use crate::tracker::Tracker;
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

fn reference_day(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s),
        None => Ok(tracker.today()),
    }
}

pub fn totals(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let t = aggregate::compute_totals(tracker.ledger().transactions());
    if !maybe_print_json(json_flag, jsonl_flag, &t)? {
        let ccy = tracker.settings().currency.as_str();
        let rows = vec![vec![
            fmt_money(&t.balance, ccy),
            format!("+{}", fmt_money(&t.income, ccy)),
            format!("-{}", fmt_money(&t.expense, ccy)),
        ]];
        println!("{}", pretty_table(&["Balance", "Income", "Expense"], rows));
    }
    Ok(())
}

fn breakdown_rows(b: &Breakdown, ccy: &str) -> Vec<Vec<String>> {
    b.shares()
        .iter()
        .map(|s| {
            let info = s.category.info();
            vec![
                format!("{} {}", info.icon, info.name),
                fmt_money(&s.amount, ccy),
                format!("{:.1}%", s.percentage),
            ]
        })
        .collect()
}

pub fn breakdown(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let top = sub.get_one::<usize>("top").copied().unwrap_or(5);
    let b = aggregate::category_breakdown(tracker.ledger().transactions()).top(top);
    if maybe_print_json(json_flag, jsonl_flag, &b)? {
        return Ok(());
    }
    if b.is_empty() {
        println!("Add expenses to see category breakdown");
        return Ok(());
    }
    let rows = breakdown_rows(&b, &tracker.settings().currency);
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

pub fn categories(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = aggregate::category_summary(tracker.ledger().transactions());
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = tracker.settings().currency.as_str();
        let rows = data
            .iter()
            .map(|s| {
                let info = s.category.info();
                vec![
                    format!("{} {}", info.icon, info.name),
                    fmt_money(&s.income, ccy),
                    fmt_money(&s.expense, ccy),
                    s.count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Income", "Expenses", "Transactions"], rows)
        );
    }
    Ok(())
}

pub fn trend(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days = sub
        .get_one::<u32>("days")
        .copied()
        .unwrap_or(aggregate::DEFAULT_TREND_DAYS);
    let day = reference_day(tracker, sub)?;
    let points = aggregate::trend(tracker.ledger().transactions(), days, day);
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let ccy = tracker.settings().currency.as_str();
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.date.format("%a %Y-%m-%d").to_string(),
                    fmt_money(&p.amount, ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Spent"], rows));
    }
    Ok(())
}

pub fn stats(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let day = reference_day(tracker, sub)?;
    let s = aggregate::quick_stats(tracker.ledger().transactions(), day);
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let ccy = tracker.settings().currency.as_str();
        let rows = vec![vec![
            fmt_money(&s.month_total, ccy),
            fmt_money(&s.avg_transaction_abs, ccy),
            s.count.to_string(),
        ]];
        println!(
            "{}",
            pretty_table(&["This month", "Avg transaction", "Count"], rows)
        );
    }
    Ok(())
}

pub fn dashboard(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let d = tracker.dashboard();
    if maybe_print_json(sub.get_flag("json"), false, &d)? {
        return Ok(());
    }
    let ccy = tracker.settings().currency.clone();

    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expense"],
            vec![vec![
                fmt_money(&d.totals.balance, &ccy),
                format!("+{}", fmt_money(&d.totals.income, &ccy)),
                format!("-{}", fmt_money(&d.totals.expense, &ccy)),
            ]],
        )
    );

    if d.recent.is_empty() {
        println!("No transactions yet");
    } else {
        let rows = d
            .recent
            .iter()
            .map(|t| vec![t.title.clone(), fmt_signed(t, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Recent", "Amount"], rows));
    }

    if d.breakdown.is_empty() {
        println!("Add expenses to see category breakdown");
    } else {
        let rows = breakdown_rows(&d.breakdown, &ccy);
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }

    let rows = vec![
        d.trend
            .iter()
            .map(|p| format!("{}\n{}", p.date.format("%a"), fmt_money(&p.amount, &ccy)))
            .collect(),
    ];
    let headers: Vec<String> = d.trend.iter().map(|p| p.date.format("%m-%d").to_string()).collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("{}", pretty_table(&headers, rows));

    println!(
        "{}",
        pretty_table(
            &["This month", "Avg transaction", "Count"],
            vec![vec![
                fmt_money(&d.stats.month_total, &ccy),
                fmt_money(&d.stats.avg_transaction_abs, &ccy),
                d.stats.count.to_string(),
            ]],
        )
    );
    Ok(())
}
