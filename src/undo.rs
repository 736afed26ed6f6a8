// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Single-slot, time-boxed undo for deletions.
//!
//! Removal from the ledger is immediate. The controller only keeps the
//! removed entry and its old index so that, within the window, a
//! compensating reinsertion can put it back. Arming again finalizes the
//! previous deletion; slots never stack.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

use crate::error::UndoError;
use crate::ledger::Ledger;
use crate::models::Transaction;

pub const DEFAULT_UNDO_WINDOW_SECS: i64 = 5;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock; clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub transaction: Transaction,
    pub index: usize,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UndoController {
    window: Duration,
    slot: Option<PendingDelete>,
}

impl Default for UndoController {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoController {
    pub fn new() -> Self {
        Self::with_window(Duration::seconds(DEFAULT_UNDO_WINDOW_SECS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self { window, slot: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Holds `transaction` for possible reinsertion at `index`. Returns the
    /// previously pending deletion, which is now final.
    pub fn arm(
        &mut self,
        transaction: Transaction,
        index: usize,
        now: DateTime<Utc>,
    ) -> Option<Transaction> {
        let expires_at = now + self.window;
        tracing::debug!(id = %transaction.id, index, %expires_at, "undo armed");
        let previous = self.slot.replace(PendingDelete {
            transaction,
            index,
            expires_at,
        });
        previous.map(|p| {
            tracing::debug!(id = %p.transaction.id, "pending deletion finalized by newer one");
            p.transaction
        })
    }

    /// Reinserts the pending deletion if the window is still open.
    pub fn restore(
        &mut self,
        ledger: &mut Ledger,
        now: DateTime<Utc>,
    ) -> Result<Transaction, UndoError> {
        self.poll(now);
        let pending = self.slot.take().ok_or(UndoError::NothingToUndo)?;
        let tx = pending.transaction.clone();
        match ledger.restore(pending.transaction, pending.index) {
            Some(at) => {
                tracing::debug!(id = %tx.id, at, "undo applied");
                Ok(tx)
            }
            None => Err(UndoError::NothingToUndo),
        }
    }

    /// Expiry tick. Clears the slot once the deadline has passed and
    /// returns the deletion that just became permanent.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<Transaction> {
        let expired = self.slot.as_ref().is_some_and(|p| now >= p.expires_at);
        if !expired {
            return None;
        }
        let pending = self.slot.take()?;
        tracing::debug!(id = %pending.transaction.id, "undo window expired");
        Some(pending.transaction)
    }

    /// Drops the slot without restoring.
    pub fn clear(&mut self) -> Option<Transaction> {
        self.slot.take().map(|p| p.transaction)
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.slot.as_ref()
    }

    pub fn is_armed(&self, now: DateTime<Utc>) -> bool {
        self.slot.as_ref().is_some_and(|p| now < p.expires_at)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.slot
            .as_ref()
            .filter(|p| now < p.expires_at)
            .map(|p| p.expires_at - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn restore_within_window_reinserts_at_original_index() {
        let mut ledger = Ledger::new(MemoryStore::new().shared());
        let a = ledger.add("A", Decimal::ONE, Category::Other).unwrap();
        ledger.add("B", Decimal::ONE, Category::Other).unwrap();
        let before = ledger.snapshot();

        let mut undo = UndoController::new();
        let (removed, index) = ledger.remove_by_id(&a.id).unwrap();
        undo.arm(removed, index, start());

        let restored = undo.restore(&mut ledger, start() + Duration::seconds(4)).unwrap();
        assert_eq!(restored.id, a.id);
        assert_eq!(ledger.snapshot(), before);
        assert!(undo.pending().is_none());
    }

    #[test]
    fn restore_after_window_is_nothing_to_undo() {
        let mut ledger = Ledger::new(MemoryStore::new().shared());
        let a = ledger.add("A", Decimal::ONE, Category::Other).unwrap();
        let mut undo = UndoController::new();
        let (removed, index) = ledger.remove_by_id(&a.id).unwrap();
        undo.arm(removed, index, start());

        let late = start() + Duration::seconds(DEFAULT_UNDO_WINDOW_SECS);
        assert_eq!(undo.restore(&mut ledger, late), Err(UndoError::NothingToUndo));
        assert!(ledger.is_empty());
    }

    #[test]
    fn restore_of_reappeared_id_is_nothing_to_undo() {
        let mut ledger = Ledger::new(MemoryStore::new().shared());
        let a = ledger.add("A", Decimal::ONE, Category::Other).unwrap();
        let mut undo = UndoController::new();
        let (removed, index) = ledger.remove_by_id(&a.id).unwrap();
        undo.arm(removed.clone(), index, start());
        ledger.replace_all(vec![removed]);

        let at = start() + Duration::seconds(1);
        assert_eq!(undo.restore(&mut ledger, at), Err(UndoError::NothingToUndo));
        assert_eq!(ledger.len(), 1);
        assert!(undo.pending().is_none());
    }

    #[test]
    fn arming_again_finalizes_previous() {
        let mut undo = UndoController::new();
        let mut ledger = Ledger::new(MemoryStore::new().shared());
        let a = ledger.add("A", Decimal::ONE, Category::Other).unwrap();
        let b = ledger.add("B", Decimal::ONE, Category::Other).unwrap();
        let (ra, ia) = ledger.remove_by_id(&a.id).unwrap();
        assert!(undo.arm(ra, ia, start()).is_none());
        let (rb, ib) = ledger.remove_by_id(&b.id).unwrap();
        let finalized = undo.arm(rb, ib, start() + Duration::seconds(1)).unwrap();
        assert_eq!(finalized.id, a.id);

        undo.restore(&mut ledger, start() + Duration::seconds(2)).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].id, b.id);
    }

    #[test]
    fn poll_clears_only_after_deadline() {
        let mut undo = UndoController::with_window(Duration::seconds(5));
        let tx = Transaction {
            id: "x".into(),
            title: "X".into(),
            amount: Decimal::ONE,
            category: Category::Other,
            date: None,
        };
        undo.arm(tx, 0, start());
        assert!(undo.poll(start() + Duration::seconds(4)).is_none());
        assert_eq!(
            undo.remaining(start() + Duration::seconds(4)),
            Some(Duration::seconds(1))
        );
        assert!(undo.poll(start() + Duration::seconds(5)).is_some());
        assert!(!undo.is_armed(start() + Duration::seconds(5)));
        assert!(undo.poll(start() + Duration::seconds(6)).is_none());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(start());
        let handle = clock.clone();
        handle.advance(Duration::seconds(3));
        assert_eq!(clock.now(), start() + Duration::seconds(3));
    }
}
