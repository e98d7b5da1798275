//! Normalizes raw scheduled transactions into dated occurrences.

use anyhow::bail;
use chrono::NaiveDate;
use serde::Serialize;

use crate::model::ynab::ScheduledTransaction;
use crate::model::{Amount, RecurrenceSpec};
use crate::projection::recurrence;
use crate::Result;

/// One instance of a transaction hitting the account on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    /// Signed amount; outflows are negative.
    pub amount: Amount,
    /// Payee name, annotated with the frequency for recurring transactions.
    pub label: String,
    /// The account this occurrence transfers funds to, if any.
    pub transfer_account_id: Option<String>,
}

/// Expands the scheduled transactions of `account_id` into occurrences
/// within `[start, end]` inclusive, sorted ascending by date.
///
/// Transactions for other accounts and deleted transactions are skipped. The
/// anchor is the provider-maintained next date, falling back to the first
/// date. A transaction with neither is ambiguous input and fails the whole
/// projection rather than silently producing a wrong one. The sort is stable,
/// so occurrences on the same date keep their input order.
pub fn expand_scheduled(
    scheduled: &[ScheduledTransaction],
    account_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Occurrence>> {
    let mut occurrences = Vec::new();
    for txn in scheduled {
        if txn.account_id != account_id || txn.deleted {
            continue;
        }

        let anchor = match txn.date_next.or(txn.date_first) {
            Some(anchor) => anchor,
            None => bail!(
                "Scheduled transaction '{}' for payee '{}' has no next or first date",
                txn.id,
                txn.payee()
            ),
        };

        let frequency = txn.frequency();
        let amount = Amount::from_milliunits(txn.amount);
        let label = if frequency.is_one_time() {
            txn.payee().to_string()
        } else {
            format!("{} ({})", txn.payee(), frequency)
        };

        let dates = recurrence::expand(RecurrenceSpec::new(anchor, frequency), start, end);
        for date in dates {
            occurrences.push(Occurrence {
                date,
                amount,
                label: label.clone(),
                transfer_account_id: txn.transfer_account_id.clone(),
            });
        }
    }
    occurrences.sort_by_key(|o| o.date);
    Ok(occurrences)
}
