// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, TimeZone, Utc};
use pennywise::{
    aggregate::{self, Breakdown, CategoryShare, Totals},
    error::{LedgerError, UndoError, ValidationError},
    ledger::{Ledger, TransactionInput},
    models::{Category, TransactionKind},
    store::{FileStore, MemoryStore, TRANSACTIONS_KEY},
    tracker::Tracker,
    undo::{ManualClock, DEFAULT_UNDO_WINDOW_SECS},
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::rc::Rc;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn id_set(ledger: &Ledger) -> BTreeSet<String> {
    ledger
        .transactions()
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

fn clocked() -> (Tracker, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 20, 18, 0, 0).unwrap());
    (
        Tracker::with_clock(MemoryStore::new().shared(), clock.clone()),
        clock,
    )
}

#[test]
fn add_then_remove_restores_id_set() {
    let mut ledger = Ledger::new(MemoryStore::new().shared());
    ledger.add("Seed", dec("10"), Category::Other).unwrap();
    let before = id_set(&ledger);
    for (title, amount, cat) in [
        ("Coffee", "-4.50", Category::Food),
        ("Bonus", "250", Category::Salary),
        ("Max", "-1000000", Category::Shopping),
    ] {
        let tx = ledger.add(title, dec(amount), cat).unwrap();
        ledger.remove_by_id(&tx.id).unwrap();
        assert_eq!(id_set(&ledger), before);
    }
}

#[test]
fn totals_are_additive() {
    let mut a = Ledger::new(MemoryStore::new().shared());
    let mut b = Ledger::new(MemoryStore::new().shared());
    a.add("Coffee", dec("-4.50"), Category::Food).unwrap();
    a.add("Paycheck", dec("2000"), Category::Salary).unwrap();
    b.add("Rent", dec("-1200"), Category::Bills).unwrap();
    b.add("Refund", dec("0.10"), Category::Other).unwrap();

    let mut both = a.snapshot();
    both.extend(b.snapshot());
    assert_eq!(
        aggregate::compute_totals(&both),
        aggregate::compute_totals(a.transactions()) + aggregate::compute_totals(b.transactions())
    );
}

#[test]
fn restore_before_expiry_reproduces_snapshot() {
    let (mut tracker, clock) = clocked();
    for i in 0..4 {
        tracker
            .add(&format!("T{}", i), dec("-1"), Category::Other)
            .unwrap();
    }
    let before = tracker.ledger().snapshot();
    let victim = before[1].id.clone();
    tracker.delete(&victim).unwrap();
    clock.advance(Duration::milliseconds(4_999));
    tracker.undo().unwrap();
    assert_eq!(tracker.ledger().snapshot(), before);
}

#[test]
fn restore_after_expiry_is_noop() {
    let (mut tracker, clock) = clocked();
    let tx = tracker.add("Coffee", dec("-4.50"), Category::Food).unwrap();
    tracker.delete(&tx.id).unwrap();
    clock.advance(Duration::seconds(DEFAULT_UNDO_WINDOW_SECS));
    assert_eq!(tracker.undo(), Err(UndoError::NothingToUndo));
    assert_eq!(tracker.undo(), Err(UndoError::NothingToUndo));
    assert!(tracker.ledger().get(&tx.id).is_none());
}

#[test]
fn second_delete_finalizes_first() {
    let (mut tracker, _) = clocked();
    let a = tracker.add("A", dec("1"), Category::Other).unwrap();
    let b = tracker.add("B", dec("1"), Category::Other).unwrap();
    tracker.delete(&a.id).unwrap();
    tracker.delete(&b.id).unwrap();
    assert_eq!(tracker.undo().unwrap().id, b.id);
    assert_eq!(tracker.undo(), Err(UndoError::NothingToUndo));
    assert!(tracker.ledger().get(&a.id).is_none());
}

#[test]
fn amount_boundaries() {
    let mut ledger = Ledger::new(MemoryStore::new().shared());
    let at_limit = TransactionInput::new("Car", "1000000.00", TransactionKind::Expense, "transport");
    assert!(ledger.submit(&at_limit).is_ok());

    let over = TransactionInput::new("Car", "1000000.01", TransactionKind::Expense, "transport");
    let err = ledger.submit(&over).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::AmountTooLarge)
    ));

    let zero = TransactionInput::new("Car", "0", TransactionKind::Income, "transport");
    let err = ledger.submit(&zero).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::NonPositiveAmount)
    ));

    assert!(ledger.add("Car", Decimal::ZERO, Category::Transport).is_err());
    assert!(ledger.add("Car", dec("-1000000"), Category::Transport).is_ok());
    assert_eq!(ledger.len(), 2);
}

#[test]
fn coffee_scenario_totals() {
    let mut ledger = Ledger::new(MemoryStore::new().shared());
    ledger.add("Coffee", dec("-4.50"), Category::Food).unwrap();
    assert_eq!(
        aggregate::compute_totals(ledger.transactions()),
        Totals {
            income: Decimal::ZERO,
            expense: dec("4.50"),
            balance: dec("-4.50"),
        }
    );
}

#[test]
fn breakdown_excludes_income() {
    let mut ledger = Ledger::new(MemoryStore::new().shared());
    ledger.add("Paycheck", dec("2000"), Category::Salary).unwrap();
    ledger.add("Rent", dec("-1200"), Category::Bills).unwrap();
    assert_eq!(
        aggregate::category_breakdown(ledger.transactions()),
        Breakdown::Shares(vec![CategoryShare {
            category: Category::Bills,
            amount: dec("1200"),
            percentage: dec("100.0"),
        }])
    );
}

#[test]
fn load_drops_shapeless_entries() {
    let mem = MemoryStore::with_entry(TRANSACTIONS_KEY, r#"[{"title":"x"}]"#);
    assert!(Ledger::load(mem.shared()).is_empty());
}

#[test]
fn file_store_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = Rc::new(FileStore::open(dir.path()).unwrap());
    let id = {
        let mut tracker = Tracker::open(store.clone());
        tracker.add("Rent", dec("-1200"), Category::Bills).unwrap().id
    };
    assert!(dir.path().join("et_transactions_v1.json").exists());

    let reopened = Tracker::open(store);
    assert_eq!(reopened.ledger().len(), 1);
    assert_eq!(reopened.ledger().transactions()[0].id, id);
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("et_transactions_v1.json"), "not json").unwrap();
    let store = Rc::new(FileStore::open(dir.path()).unwrap());
    assert!(Ledger::load(store).is_empty());
}
