// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::ImportFormatError;
use crate::models::{Category, CategoryInfo, Settings, Transaction};
use crate::store::decode_transactions;

/// Full snapshot written by `export`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub transactions: Vec<Transaction>,
    pub categories: BTreeMap<&'static str, CategoryInfo>,
    pub settings: Settings,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(transactions: Vec<Transaction>, settings: Settings, at: DateTime<Utc>) -> Self {
        Self {
            transactions,
            categories: category_registry(),
            settings,
            export_date: at,
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn category_registry() -> BTreeMap<&'static str, CategoryInfo> {
    Category::ALL.iter().map(|c| (c.key(), c.info())).collect()
}

pub fn export_file_name(day: NaiveDate) -> String {
    format!("expense-tracker-backup-{}.json", day.format("%Y-%m-%d"))
}

/// A structurally valid backup, ready to replace the current data.
#[derive(Debug, Clone)]
pub struct ImportDocument {
    pub transactions: Vec<Transaction>,
    pub settings: Option<Settings>,
}

/// Parses a backup. Only the `transactions` array is required; malformed
/// entries inside it are dropped rather than failing the document.
pub fn parse_import(text: &str) -> Result<ImportDocument, ImportFormatError> {
    let value: Value = serde_json::from_str(text)?;
    let transactions = value
        .get("transactions")
        .and_then(decode_transactions)
        .ok_or(ImportFormatError::MissingTransactions)?;
    let settings = value
        .get("settings")
        .and_then(|s| serde_json::from_value::<Settings>(s.clone()).ok())
        .map(Settings::normalized);
    Ok(ImportDocument {
        transactions,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Theme, TransactionId};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn export_document_has_expected_shape() {
        let tx = Transaction {
            id: TransactionId::from("t1"),
            title: "Coffee".into(),
            amount: Decimal::new(-450, 2),
            category: Category::Food,
            date: None,
        };
        let at = Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap();
        let doc = ExportDocument::new(vec![tx], Settings::default(), at);
        let v: Value = serde_json::from_str(&doc.to_pretty_json().unwrap()).unwrap();
        assert_eq!(v["transactions"][0]["amount"], json!(-4.5));
        assert_eq!(v["categories"]["food"]["name"], json!("Food & Dining"));
        assert_eq!(v["settings"]["theme"], json!("light"));
        assert!(v["exportDate"].as_str().unwrap().starts_with("2025-05-06T07:08:09"));
    }

    #[test]
    fn file_name_uses_day() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(export_file_name(day), "expense-tracker-backup-2025-01-09.json");
    }

    #[test]
    fn import_requires_transactions_array() {
        assert!(matches!(
            parse_import("not json"),
            Err(ImportFormatError::Unreadable(_))
        ));
        assert!(matches!(
            parse_import(r#"{"transactions": {}}"#),
            Err(ImportFormatError::MissingTransactions)
        ));
        assert!(matches!(
            parse_import("[]"),
            Err(ImportFormatError::MissingTransactions)
        ));
    }

    #[test]
    fn import_reads_transactions_and_settings() {
        let doc = parse_import(
            &json!({
                "transactions": [
                    {"id": "a", "title": "Rent", "amount": -1200, "category": "bills"},
                    {"title": "broken"}
                ],
                "settings": {"theme": "dark", "currency": "EUR"}
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(doc.transactions.len(), 1);
        let settings = doc.settings.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency, "EUR");
    }
}
