// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TransactionId;

/// Rejected user input. Display strings are the user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a transaction title.")]
    EmptyTitle,
    #[error("Please enter an amount.")]
    EmptyAmount,
    #[error("Amount must be a valid number.")]
    InvalidAmount,
    #[error("Please enter a positive amount.")]
    NonPositiveAmount,
    #[error("Amount is too large.")]
    AmountTooLarge,
    #[error("Currency must be a three-letter code.")]
    InvalidCurrency,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction '{0}' not found")]
    NotFound(TransactionId),
}

/// Storage failure. Callers log and swallow these; in-memory state stays
/// authoritative for the session.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("Storage unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ImportFormatError {
    #[error("Error reading backup file: {0}")]
    Unreadable(#[from] serde_json::Error),
    #[error("Invalid backup file format.")]
    MissingTransactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("Nothing to undo")]
    NothingToUndo,
}
