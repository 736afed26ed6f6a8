// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure summaries over a transaction snapshot.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Add;

use crate::models::{Category, Transaction};

pub const DEFAULT_TREND_DAYS: u32 = 7;
/// Longest trend window, one leap year.
pub const MAX_TREND_DAYS: u32 = 366;
pub const DASHBOARD_TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            income: self.income + rhs.income,
            expense: self.expense + rhs.expense,
            balance: self.balance + rhs.balance,
        }
    }
}

pub fn compute_totals(list: &[Transaction]) -> Totals {
    let (income, expense) = list.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(inc, exp), tx| {
            if tx.is_expense() {
                (inc, exp + tx.magnitude())
            } else {
                (inc + tx.amount, exp)
            }
        },
    );
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    /// Share of total expense, one decimal place.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "shares", rename_all = "lowercase")]
pub enum Breakdown {
    /// No expenses recorded.
    Empty,
    Shares(Vec<CategoryShare>),
}

impl Breakdown {
    pub fn top(self, n: usize) -> Breakdown {
        match self {
            Breakdown::Empty => Breakdown::Empty,
            Breakdown::Shares(mut shares) => {
                shares.truncate(n);
                Breakdown::Shares(shares)
            }
        }
    }

    pub fn shares(&self) -> &[CategoryShare] {
        match self {
            Breakdown::Empty => &[],
            Breakdown::Shares(shares) => shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Breakdown::Empty)
    }
}

/// Expense totals per category, largest first. Ties keep registry order.
pub fn category_breakdown(list: &[Transaction]) -> Breakdown {
    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
    for tx in list.iter().filter(|t| t.is_expense()) {
        *by_category.entry(tx.category).or_insert(Decimal::ZERO) += tx.magnitude();
    }
    if by_category.is_empty() {
        return Breakdown::Empty;
    }
    let total: Decimal = by_category.values().copied().sum();
    let mut shares: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect();
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    Breakdown::Shares(shares)
}

fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub income: Decimal,
    pub expense: Decimal,
    pub count: usize,
}

/// Income, expense and count for every registry category, in registry order.
pub fn category_summary(list: &[Transaction]) -> Vec<CategorySummary> {
    Category::ALL
        .iter()
        .map(|&category| {
            let (income, expense, count) = list
                .iter()
                .filter(|t| t.category == category)
                .fold((Decimal::ZERO, Decimal::ZERO, 0), |(inc, exp, n), tx| {
                    if tx.is_expense() {
                        (inc, exp + tx.magnitude(), n + 1)
                    } else {
                        (inc + tx.amount, exp, n + 1)
                    }
                });
            CategorySummary {
                category,
                income,
                expense,
                count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Daily expense for the `days` calendar days ending at `reference_day`,
/// oldest first. Undated transactions count toward `reference_day`.
pub fn trend(list: &[Transaction], days: u32, reference_day: NaiveDate) -> Vec<TrendPoint> {
    let days = days.min(MAX_TREND_DAYS);
    let mut buckets: BTreeMap<NaiveDate, Decimal> = (0..days)
        .filter_map(|back| reference_day.checked_sub_days(Days::new(u64::from(back))))
        .map(|d| (d, Decimal::ZERO))
        .collect();
    for tx in list.iter().filter(|t| t.is_expense()) {
        if let Some(bucket) = buckets.get_mut(&tx.day_or(reference_day)) {
            *bucket += tx.magnitude();
        }
    }
    buckets
        .into_iter()
        .map(|(date, amount)| TrendPoint { date, amount })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub month_total: Decimal,
    pub avg_transaction_abs: Decimal,
    pub count: usize,
}

pub fn quick_stats(list: &[Transaction], reference_day: NaiveDate) -> QuickStats {
    let month_total = list
        .iter()
        .filter(|t| {
            let day = t.day_or(reference_day);
            day.year() == reference_day.year() && day.month() == reference_day.month()
        })
        .map(Transaction::magnitude)
        .sum();
    let avg_transaction_abs = if list.is_empty() {
        Decimal::ZERO
    } else {
        let sum: Decimal = list.iter().map(Transaction::magnitude).sum();
        sum / Decimal::from(list.len())
    };
    QuickStats {
        month_total,
        avg_transaction_abs,
        count: list.len(),
    }
}
