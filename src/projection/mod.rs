//! The projection engine: recurrence expansion, credit-card reconciliation,
//! day-by-day simulation and threshold evaluation.
//!
//! Everything in this module is a pure, synchronous computation over a
//! point-in-time snapshot. Fetching the snapshot and delivering the
//! resulting notification belong to the `api` and `notify` modules.

mod loader;
mod reconcile;
pub mod recurrence;
mod simulate;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::ynab::ScheduledTransaction;
use crate::model::Amount;
use crate::Result;

pub use loader::{expand_scheduled, Occurrence};
pub use reconcile::{reconcile, PendingPayment, Reconciliation};
pub use simulate::{simulate, ProjectionResult};

/// The outcome of comparing the projected minimum against the configured
/// floor. A classification, not an I/O operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AlertDecision {
    /// The projected minimum stays at or above the threshold.
    Clear,
    /// The projected minimum falls below the threshold by `shortfall`.
    Breach { shortfall: Amount },
}

impl AlertDecision {
    pub fn is_breach(&self) -> bool {
        matches!(self, AlertDecision::Breach { .. })
    }
}

/// Classifies a projected minimum against the configured threshold.
pub fn evaluate(minimum_balance: Amount, threshold: Amount) -> AlertDecision {
    if minimum_balance < threshold {
        AlertDecision::Breach {
            shortfall: threshold - minimum_balance,
        }
    } else {
        AlertDecision::Clear
    }
}

/// Everything one projection run produces, for reporting and notification.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionOutcome {
    pub occurrences: Vec<Occurrence>,
    pub reconciliation: Reconciliation,
    pub result: ProjectionResult,
    pub decision: AlertDecision,
}

/// Runs the whole projection over one snapshot of input data.
///
/// Expands `scheduled` into occurrences inside `[today, window_end]`,
/// reconciles `pending` credit-card payments against the scheduled
/// transfers, simulates the balance day by day and evaluates the result
/// against `threshold`.
pub fn run_projection(
    current_balance: Amount,
    scheduled: &[ScheduledTransaction],
    pending: Vec<PendingPayment>,
    account_id: &str,
    today: NaiveDate,
    window_end: NaiveDate,
    threshold: Amount,
) -> Result<ProjectionOutcome> {
    let occurrences = expand_scheduled(scheduled, account_id, today, window_end)?;
    let reconciliation = reconcile(pending, &occurrences);
    let result = simulate(
        current_balance,
        &occurrences,
        reconciliation.unscheduled_total,
        today,
        window_end,
    );
    let decision = evaluate(result.minimum_balance, threshold);
    Ok(ProjectionOutcome {
        occurrences,
        reconciliation,
        result,
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Frequency;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_evaluate_clear_at_threshold() {
        let decision = evaluate(Amount::from_units(0), Amount::from_units(0));
        assert_eq!(decision, AlertDecision::Clear);
        assert!(!decision.is_breach());
    }

    #[test]
    fn test_evaluate_breach_computes_shortfall() {
        let decision = evaluate(Amount::from_units(-100), Amount::from_units(0));
        assert_eq!(
            decision,
            AlertDecision::Breach {
                shortfall: Amount::from_units(100)
            }
        );
    }

    #[test]
    fn test_end_to_end_rent_and_unscheduled_cc() {
        // Balance $2000, rent -$1800 on day 3, an unreconciled $300 pending
        // payment: initial balance $1700, then -$100 on day 3.
        let rent = ScheduledTransaction {
            id: "st-rent".to_string(),
            account_id: "acct-1".to_string(),
            date_first: None,
            date_next: Some(d(2025, 8, 3)),
            frequency: Some(Frequency::Never),
            amount: -1_800_000,
            payee_name: Some("Landlord".to_string()),
            transfer_account_id: None,
            deleted: false,
        };
        let pending = vec![PendingPayment {
            account_id: "cc-1".to_string(),
            name: "Visa".to_string(),
            amount: Amount::from_units(300),
        }];

        let outcome = run_projection(
            Amount::from_units(2000),
            &[rent],
            pending,
            "acct-1",
            d(2025, 8, 1),
            d(2025, 8, 10),
            Amount::from_units(0),
        )
        .unwrap();

        assert_eq!(outcome.reconciliation.unscheduled_total, Amount::from_units(300));
        assert_eq!(outcome.result.minimum_balance, Amount::from_units(-100));
        assert_eq!(outcome.result.minimum_date, d(2025, 8, 3));
        assert_eq!(
            outcome.decision,
            AlertDecision::Breach {
                shortfall: Amount::from_units(100)
            }
        );
    }

    #[test]
    fn test_scheduled_transfer_not_double_counted() {
        // A scheduled transfer to the card both covers the pending payment
        // and posts as a dated outflow, so only the dated outflow remains.
        let transfer = ScheduledTransaction {
            id: "st-xfer".to_string(),
            account_id: "acct-1".to_string(),
            date_first: None,
            date_next: Some(d(2025, 8, 5)),
            frequency: Some(Frequency::Never),
            amount: -500_000,
            payee_name: Some("Transfer : Visa".to_string()),
            transfer_account_id: Some("cc-1".to_string()),
            deleted: false,
        };
        let pending = vec![PendingPayment {
            account_id: "cc-1".to_string(),
            name: "Visa".to_string(),
            amount: Amount::from_units(500),
        }];

        let outcome = run_projection(
            Amount::from_units(1000),
            &[transfer],
            pending,
            "acct-1",
            d(2025, 8, 1),
            d(2025, 8, 10),
            Amount::from_units(0),
        )
        .unwrap();

        assert!(outcome.reconciliation.unscheduled_total.is_zero());
        assert_eq!(outcome.result.minimum_balance, Amount::from_units(500));
        assert_eq!(outcome.result.minimum_date, d(2025, 8, 5));
        assert_eq!(outcome.decision, AlertDecision::Clear);
    }
}
