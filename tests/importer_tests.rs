// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pennywise::{
    cli,
    commands::{exporter, importer},
    models::{Category, Theme},
    store::{self, MemoryStore},
    tracker::Tracker,
};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn import(tracker: &mut Tracker, path: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(["pennywise", "import", path, "--yes"]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(tracker, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn backup_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_replaces_ledger_and_settings() {
    let mem = MemoryStore::new();
    let mut tracker = Tracker::open(mem.shared());
    tracker
        .add("Old", Decimal::from(-1), Category::Other)
        .unwrap();

    let file = backup_file(
        r#"{
            "transactions": [
                {"id": "1", "title": "Rent", "amount": -1200, "category": "bills", "date": "2025-02-01T00:00:00.000Z"},
                {"id": "2", "title": "Paycheck", "amount": 2000, "category": "salary"},
                {"id": "3", "title": "", "amount": 5},
                {"title": "no id", "amount": 5}
            ],
            "settings": {"theme": "dark", "currency": "EUR"}
        }"#,
    );
    import(&mut tracker, file.path().to_str().unwrap()).unwrap();

    let titles: Vec<_> = tracker
        .ledger()
        .transactions()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Rent", "Paycheck"]);
    assert_eq!(tracker.settings().theme, Theme::Dark);

    // Persisted for the next session.
    assert_eq!(store::load_transactions(&mem).len(), 2);
    assert_eq!(store::load_settings(&mem).currency, "EUR");
}

#[test]
fn malformed_backup_changes_nothing() {
    let mut tracker = Tracker::open(MemoryStore::new().shared());
    tracker
        .add("Keep me", Decimal::from(-1), Category::Other)
        .unwrap();
    let before = tracker.ledger().snapshot();

    let file = backup_file(r#"{"transactions": "nope"}"#);
    let err = import(&mut tracker, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid backup file format."));

    let file = backup_file("{ truncated");
    assert!(import(&mut tracker, file.path().to_str().unwrap()).is_err());

    assert_eq!(tracker.ledger().snapshot(), before);
}

#[test]
fn import_rejects_bad_currency_code() {
    let mut tracker = Tracker::open(MemoryStore::new().shared());
    tracker.set_currency("eur").unwrap();

    let file = backup_file(
        r#"{"transactions": [], "settings": {"theme": "dark", "currency": "not a currency"}}"#,
    );
    import(&mut tracker, file.path().to_str().unwrap()).unwrap();
    assert_eq!(tracker.settings().currency, "USD");
    assert_eq!(tracker.settings().theme, Theme::Dark);

    let file = backup_file(r#"{"transactions": [], "settings": {"currency": "gbp"}}"#);
    import(&mut tracker, file.path().to_str().unwrap()).unwrap();
    assert_eq!(tracker.settings().currency, "GBP");
}

#[test]
fn export_then_import_into_fresh_session() {
    let mut source = Tracker::open(MemoryStore::new().shared());
    source
        .add("Coffee", Decimal::new(-450, 2), Category::Food)
        .unwrap();
    source
        .add("Paycheck", Decimal::from(2000), Category::Salary)
        .unwrap();
    source.set_currency("gbp").unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("backup.json");
    let out_str = out.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from(["pennywise", "export", "--out", &out_str]);
    let (_, export_m) = matches.subcommand().unwrap();
    exporter::handle(&source, export_m).unwrap();

    let mut target = Tracker::open(MemoryStore::new().shared());
    import(&mut target, &out_str).unwrap();
    assert_eq!(target.ledger().snapshot(), source.ledger().snapshot());
    assert_eq!(target.settings().currency, "GBP");
}
