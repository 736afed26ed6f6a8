// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque transaction identifier. Fresh ids are UUID v4 strings; ids read
/// back from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Fixed category registry. Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Salary,
    Freelance,
    Investment,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Health,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Health => "health",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Other => "other",
        }
    }

    pub fn info(self) -> CategoryInfo {
        let (name, icon, color) = match self {
            Category::Food => ("Food & Dining", "🍽️", "#f59e0b"),
            Category::Transport => ("Transportation", "🚗", "#3b82f6"),
            Category::Shopping => ("Shopping", "🛍️", "#ec4899"),
            Category::Entertainment => ("Entertainment", "🎬", "#8b5cf6"),
            Category::Bills => ("Bills & Utilities", "💡", "#ef4444"),
            Category::Health => ("Health & Fitness", "🏥", "#10b981"),
            Category::Salary => ("Salary", "💰", "#059669"),
            Category::Freelance => ("Freelance", "💼", "#0891b2"),
            Category::Investment => ("Investment", "📈", "#7c3aed"),
            Category::Other => ("Other", "📝", "#6b7280"),
        };
        CategoryInfo { name, icon, color }
    }

    /// Unknown or blank keys fall back to `Other`.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
            .unwrap_or_default()
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_key(&s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies this direction to a magnitude.
    pub fn sign(self, magnitude: Decimal) -> Decimal {
        match self {
            TransactionKind::Income => magnitude.abs(),
            TransactionKind::Expense => -magnitude.abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TransactionKind::Expense
    }

    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    /// Calendar day (UTC) of the transaction, or `fallback` when undated.
    pub fn day_or(&self, fallback: NaiveDate) -> NaiveDate {
        self.date.map(|d| d.date_naive()).unwrap_or(fallback)
    }

    /// Lenient decode of a stored entry. Requires `id` and `title` to be
    /// strings and `amount` to be a number; everything else degrades to a
    /// default.
    pub fn from_json(value: &Value) -> Option<Self> {
        let id = value.get("id")?.as_str()?;
        let title = value.get("title")?.as_str()?;
        let amount = match value.get("amount")? {
            Value::Number(n) => decimal_from_number(n)?,
            _ => return None,
        };
        let category = value
            .get("category")
            .and_then(Value::as_str)
            .map(Category::from_key)
            .unwrap_or_default();
        let date = value
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_timestamp);
        Some(Self {
            id: TransactionId::from(id),
            title: title.to_string(),
            amount,
            category,
            date,
        })
    }
}

fn decimal_from_number(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            currency: "USD".to_string(),
        }
    }
}

impl Settings {
    /// Upper-cases the currency code, falling back to the default when it is
    /// not a three-letter code.
    pub fn normalized(self) -> Self {
        let currency = crate::validation::normalize_currency(&self.currency).unwrap_or_else(|_| {
            tracing::warn!(currency = %self.currency, "invalid currency in settings; using default");
            Settings::default().currency
        });
        Self { currency, ..self }
    }
}
