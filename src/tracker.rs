// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session facade used by the front end. Owns one ledger, its undo slot and
//! the settings, and wires deletion to the undo controller.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{
    self, Breakdown, QuickStats, Totals, TrendPoint, DASHBOARD_TOP_CATEGORIES, DEFAULT_TREND_DAYS,
};
use crate::backup::{ExportDocument, ImportDocument};
use crate::error::{LedgerError, UndoError, ValidationError};
use crate::ledger::{Ledger, TransactionInput};
use crate::models::{Category, Settings, Theme, Transaction, TransactionId};
use crate::store::{self, SharedStore};
use crate::undo::{Clock, SystemClock, UndoController};
use crate::validation::normalize_currency;

pub const DASHBOARD_RECENT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub recent: Vec<Transaction>,
    pub breakdown: Breakdown,
    pub trend: Vec<TrendPoint>,
    pub stats: QuickStats,
}

pub struct Tracker {
    store: SharedStore,
    ledger: Ledger,
    undo: UndoController,
    settings: Settings,
    clock: Box<dyn Clock>,
}

impl Tracker {
    pub fn open(store: SharedStore) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: SharedStore, clock: impl Clock + 'static) -> Self {
        let ledger = Ledger::load(store.clone());
        let settings = store::load_settings(store.as_ref());
        Self {
            store,
            ledger,
            undo: UndoController::new(),
            settings,
            clock: Box::new(clock),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn undo_state(&self) -> &UndoController {
        &self.undo
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn submit(&mut self, input: &TransactionInput) -> Result<Transaction, LedgerError> {
        let now = self.now();
        self.ledger.submit_dated(input, now)
    }

    pub fn add(
        &mut self,
        title: &str,
        amount: Decimal,
        category: Category,
    ) -> Result<Transaction, LedgerError> {
        let now = self.now();
        self.ledger.add_dated(title, amount, category, now)
    }

    /// Removes the transaction right away and arms undo for it.
    pub fn delete(&mut self, id: &TransactionId) -> Result<Transaction, LedgerError> {
        let now = self.now();
        let (tx, index) = self.ledger.remove_by_id(id)?;
        if let Some(finalized) = self.undo.arm(tx.clone(), index, now) {
            tracing::info!(id = %finalized.id, "deletion is now permanent");
        }
        Ok(tx)
    }

    pub fn undo(&mut self) -> Result<Transaction, UndoError> {
        let now = self.now();
        self.undo.restore(&mut self.ledger, now)
    }

    /// Expiry tick; call before handling each user event.
    pub fn tick(&mut self) -> Option<Transaction> {
        let now = self.now();
        self.undo.poll(now)
    }

    pub fn reset(&mut self) {
        self.undo.clear();
        self.ledger.replace_all(Vec::new());
        tracing::info!("ledger reset");
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.persist_settings();
    }

    pub fn set_currency(&mut self, code: &str) -> Result<(), ValidationError> {
        self.settings.currency = normalize_currency(code)?;
        self.persist_settings();
        Ok(())
    }

    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::new(self.ledger.snapshot(), self.settings.clone(), self.now())
    }

    /// Replaces all transactions (and settings, when the backup carries
    /// them). Returns the number of transactions kept.
    pub fn import(&mut self, doc: ImportDocument) -> usize {
        self.undo.clear();
        let kept = self.ledger.replace_all(doc.transactions);
        if let Some(settings) = doc.settings {
            self.settings = settings;
            self.persist_settings();
        }
        tracing::info!(kept, "backup imported");
        kept
    }

    pub fn dashboard(&self) -> Dashboard {
        let list = self.ledger.transactions();
        let today = self.today();
        Dashboard {
            totals: aggregate::compute_totals(list),
            recent: self.ledger.recent(DASHBOARD_RECENT).to_vec(),
            breakdown: aggregate::category_breakdown(list).top(DASHBOARD_TOP_CATEGORIES),
            trend: aggregate::trend(list, DEFAULT_TREND_DAYS, today),
            stats: aggregate::quick_stats(list, today),
        }
    }

    fn persist_settings(&self) {
        if let Err(err) = store::save_settings(self.store.as_ref(), &self.settings) {
            tracing::warn!(error = %err, "failed to persist settings");
        }
    }
}
