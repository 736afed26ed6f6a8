// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ValidationError;

/// Largest accepted magnitude, inclusive.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Amounts are kept in whole cents.
pub const AMOUNT_DP: u32 = 2;

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointAwayFromZero)
}

pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Parses a user-typed magnitude. Rules run in a fixed order so the first
/// violation is the one reported.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }
    let amount = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(amount) => to_cents(amount),
        // Numeric but outside what a Decimal can hold.
        Err(_) => {
            return match raw.parse::<f64>() {
                Ok(n) if n.is_finite() && n <= 0.0 => Err(ValidationError::NonPositiveAmount),
                Ok(n) if n.is_finite() => Err(ValidationError::AmountTooLarge),
                _ => Err(ValidationError::InvalidAmount),
            };
        }
    };
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

/// Checks an already signed amount: non-zero and within the magnitude cap.
/// Returns it rounded to cents.
pub fn check_signed_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    let amount = to_cents(amount);
    if amount.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount.abs() > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

/// Validates a stored or freshly built entry, returning the trimmed title
/// and the amount in cents.
pub fn validate_entry(title: &str, amount: Decimal) -> Result<(String, Decimal), ValidationError> {
    let title = validate_title(title)?;
    let amount = check_signed_amount(amount)?;
    Ok((title, amount))
}

pub fn normalize_currency(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrency);
    }
    Ok(code.to_ascii_uppercase())
}
