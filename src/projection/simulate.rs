//! Day-by-day balance walk that finds the projected minimum.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::Amount;
use crate::projection::Occurrence;

/// The output of the simulation: the lowest projected balance and the
/// earliest date on which it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionResult {
    pub minimum_balance: Amount,
    pub minimum_date: NaiveDate,
    pub window_end: NaiveDate,
}

/// Walks every day from `today` through `window_end` inclusive, applying the
/// net of that day's occurrences and tracking the running minimum.
///
/// The unscheduled credit-card total is subtracted up front: its true timing
/// is unknown, so it is conservatively assumed to hit at the start of the
/// window. The minimum is replaced only on strict decrease, so the earliest
/// date achieving the minimum value wins.
pub fn simulate(
    starting_balance: Amount,
    occurrences: &[Occurrence],
    unscheduled_total: Amount,
    today: NaiveDate,
    window_end: NaiveDate,
) -> ProjectionResult {
    let mut by_date: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
    for occurrence in occurrences {
        *by_date.entry(occurrence.date).or_default() += occurrence.amount;
    }

    let mut balance = starting_balance - unscheduled_total;
    let mut minimum_balance = balance;
    let mut minimum_date = today;

    let mut day = today;
    while day <= window_end {
        if let Some(delta) = by_date.get(&day) {
            balance += *delta;
        }
        if balance < minimum_balance {
            minimum_balance = balance;
            minimum_date = day;
        }
        day = day + Days::new(1);
    }

    ProjectionResult {
        minimum_balance,
        minimum_date,
        window_end,
    }
}
