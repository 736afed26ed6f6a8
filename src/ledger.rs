// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The authoritative, newest-first list of transactions.
//!
//! Every mutation writes the full list back to the store before returning.
//! Write failures are logged and swallowed: the in-memory list stays
//! authoritative for the rest of the session.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::LedgerError;
use crate::models::{Category, Transaction, TransactionId, TransactionKind};
use crate::store::{self, SharedStore};
use crate::validation::{parse_amount, validate_entry, validate_title};

/// Raw form input, exactly as the user typed it.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub title: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: String,
}

impl TransactionInput {
    pub fn new(title: &str, amount: &str, kind: TransactionKind, category: &str) -> Self {
        Self {
            title: title.to_string(),
            amount: amount.to_string(),
            kind,
            category: category.to_string(),
        }
    }
}

pub struct Ledger {
    transactions: Vec<Transaction>,
    store: SharedStore,
}

impl Ledger {
    /// Empty ledger bound to `store`. Nothing is read or written yet.
    pub fn new(store: SharedStore) -> Self {
        Self {
            transactions: Vec::new(),
            store,
        }
    }

    /// Loads whatever valid entries the store holds.
    pub fn load(store: SharedStore) -> Self {
        let raw = store::load_transactions(store.as_ref());
        let transactions = sanitize(raw);
        tracing::debug!(count = transactions.len(), "ledger loaded");
        Self {
            transactions,
            store,
        }
    }

    pub fn add(
        &mut self,
        title: &str,
        amount: Decimal,
        category: Category,
    ) -> Result<Transaction, LedgerError> {
        self.add_dated(title, amount, category, Utc::now())
    }

    /// Same as [`Ledger::add`] with an explicit creation timestamp.
    pub fn add_dated(
        &mut self,
        title: &str,
        amount: Decimal,
        category: Category,
        date: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        let (title, amount) = validate_entry(title, amount)?;
        let tx = Transaction {
            id: self.fresh_id(),
            title,
            amount,
            category,
            date: Some(date),
        };
        self.transactions.insert(0, tx.clone());
        self.persist();
        tracing::debug!(id = %tx.id, amount = %tx.amount, "transaction added");
        Ok(tx)
    }

    /// Form submission: runs the ordered input rules, signs the magnitude
    /// by `kind`, then adds.
    pub fn submit(&mut self, input: &TransactionInput) -> Result<Transaction, LedgerError> {
        self.submit_dated(input, Utc::now())
    }

    pub fn submit_dated(
        &mut self,
        input: &TransactionInput,
        date: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        let title = validate_title(&input.title)?;
        let magnitude = parse_amount(&input.amount)?;
        let amount = input.kind.sign(magnitude);
        self.add_dated(&title, amount, Category::from_key(&input.category), date)
    }

    /// Removes the entry and returns it with the index it occupied.
    pub fn remove_by_id(&mut self, id: &TransactionId) -> Result<(Transaction, usize), LedgerError> {
        let index = self
            .position(id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        let tx = self.transactions.remove(index);
        self.persist();
        tracing::debug!(id = %tx.id, index, "transaction removed");
        Ok((tx, index))
    }

    /// Reinserts a previously removed entry at `min(index, len)` and returns
    /// the position used. Trusted input; only id uniqueness is checked.
    pub fn restore(&mut self, tx: Transaction, index: usize) -> Option<usize> {
        if self.position(&tx.id).is_some() {
            tracing::warn!(id = %tx.id, "restore skipped; id already present");
            return None;
        }
        let at = index.min(self.transactions.len());
        tracing::debug!(id = %tx.id, at, "transaction restored");
        self.transactions.insert(at, tx);
        self.persist();
        Some(at)
    }

    /// Replaces the whole list with the valid, de-duplicated subset of
    /// `list`. Returns how many entries were kept.
    pub fn replace_all(&mut self, list: Vec<Transaction>) -> usize {
        self.transactions = sanitize(list);
        self.persist();
        self.transactions.len()
    }

    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The `n` newest entries.
    pub fn recent(&self, n: usize) -> &[Transaction] {
        &self.transactions[..n.min(self.transactions.len())]
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| &t.id == id)
    }

    fn fresh_id(&self) -> TransactionId {
        loop {
            let id = TransactionId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = store::save_transactions(self.store.as_ref(), &self.transactions) {
            tracing::warn!(error = %err, "failed to persist transactions");
        }
    }
}

/// Drops entries that `add` would reject and any repeated id (first wins).
fn sanitize(list: Vec<Transaction>) -> Vec<Transaction> {
    let total = list.len();
    let mut seen = HashSet::new();
    let kept: Vec<Transaction> = list
        .into_iter()
        .filter_map(|mut tx| {
            (tx.title, tx.amount) = validate_entry(&tx.title, tx.amount).ok()?;
            seen.insert(tx.id.clone()).then_some(tx)
        })
        .collect();
    if kept.len() < total {
        tracing::debug!(dropped = total - kept.len(), "dropped invalid transactions");
    }
    kept
}
