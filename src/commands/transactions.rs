// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::TransactionInput;
use crate::models::{Category, TransactionId, TransactionKind};
use crate::tracker::Tracker;
use crate::utils::{confirm, fmt_signed, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn add(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").context("title missing")?;
    let amount = sub.get_one::<String>("amount").context("amount missing")?;
    let category = sub
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or("other");
    let kind = if sub.get_flag("income") {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let input = TransactionInput::new(title, amount, kind, category);
    let tx = tracker.submit(&input)?;
    println!(
        "Recorded '{}' {} [{}] (id: {})",
        tx.title,
        fmt_signed(&tx, &tracker.settings().currency),
        tx.category,
        tx.id
    );
    Ok(())
}

pub fn list(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(tracker, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.title.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Amount", "Category", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub amount: String,
    pub category: String,
}

pub fn query_rows(tracker: &Tracker, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let ccy = tracker.settings().currency.as_str();
    let category = sub
        .get_one::<String>("category")
        .map(|c| Category::from_key(c));
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    tracker
        .ledger()
        .transactions()
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: t
                .date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            title: t.title.clone(),
            amount: fmt_signed(t, ccy),
            category: format!("{} {}", t.category.info().icon, t.category.info().name),
        })
        .collect()
}

pub fn rm(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?;
    let tx = tracker.delete(&TransactionId::from(id.trim()))?;
    println!(
        "Deleted '{}'. Run `undo` within {}s to restore it.",
        tx.title,
        tracker.undo_state().window().num_seconds()
    );
    Ok(())
}

pub fn undo(tracker: &mut Tracker) -> Result<()> {
    match tracker.undo() {
        Ok(tx) => println!("Restored '{}'", tx.title),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

pub fn reset(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") && !confirm("Delete all transactions? This cannot be undone.")? {
        println!("Reset cancelled");
        return Ok(());
    }
    tracker.reset();
    println!("All transactions deleted");
    Ok(())
}
