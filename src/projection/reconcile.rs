//! Reconciliation of pending credit-card payments against scheduled
//! transfers, so a payment that already has a dated transfer occurrence is
//! not counted twice.

use serde::Serialize;

use crate::model::Amount;
use crate::projection::Occurrence;

/// An amount owed on a credit-card account that has not yet been netted
/// against scheduled transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPayment {
    pub account_id: String,
    pub name: String,
    /// Non-negative by construction.
    pub amount: Amount,
}

/// The residue of reconciliation: payments with no covering transfer, and
/// their total.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reconciliation {
    pub residual: Vec<PendingPayment>,
    /// The unscheduled amount the account must still cover at an unknown
    /// time inside the window.
    pub unscheduled_total: Amount,
}

/// Subtracts scheduled transfer occurrences from the pending payments they
/// target.
///
/// Occurrences are processed in their given order; each one covers up to the
/// smaller of the remaining pending amount and its own magnitude, so several
/// occurrences can combine to cover one payment. A payment within rounding
/// noise of zero is dropped entirely.
pub fn reconcile(pending: Vec<PendingPayment>, occurrences: &[Occurrence]) -> Reconciliation {
    let mut remaining = pending;
    for occurrence in occurrences {
        let Some(target_id) = occurrence.transfer_account_id.as_deref() else {
            continue;
        };
        if let Some(ix) = remaining.iter().position(|p| p.account_id == target_id) {
            let covered = remaining[ix].amount.min(occurrence.amount.abs());
            remaining[ix].amount -= covered;
            if remaining[ix].amount.is_settled() {
                remaining.remove(ix);
            }
        }
    }

    let unscheduled_total = remaining.iter().map(|p| p.amount).sum();
    Reconciliation {
        residual: remaining,
        unscheduled_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pending(account_id: &str, units: i64) -> PendingPayment {
        PendingPayment {
            account_id: account_id.to_string(),
            name: format!("Card {account_id}"),
            amount: Amount::from_units(units),
        }
    }

    fn transfer(target: &str, units: i64) -> Occurrence {
        Occurrence {
            date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            amount: Amount::from_units(units),
            label: format!("Transfer : Card {target}"),
            transfer_account_id: Some(target.to_string()),
        }
    }

    #[test]
    fn test_two_transfers_fully_cover_one_payment() {
        let result = reconcile(
            vec![pending("cc-1", 500)],
            &[transfer("cc-1", -200), transfer("cc-1", -300)],
        );
        assert!(result.residual.is_empty());
        assert!(result.unscheduled_total.is_zero());
    }

    #[test]
    fn test_partial_coverage_leaves_residual() {
        let result = reconcile(vec![pending("cc-1", 500)], &[transfer("cc-1", -200)]);
        assert_eq!(result.residual.len(), 1);
        assert_eq!(result.residual[0].amount, Amount::from_units(300));
        assert_eq!(result.unscheduled_total, Amount::from_units(300));
    }

    #[test]
    fn test_oversized_transfer_covers_only_pending_amount() {
        let result = reconcile(vec![pending("cc-1", 200)], &[transfer("cc-1", -500)]);
        assert!(result.residual.is_empty());
        assert!(result.unscheduled_total.is_zero());
    }

    #[test]
    fn test_non_transfer_occurrences_ignored() {
        let ordinary = Occurrence {
            date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            amount: Amount::from_units(-500),
            label: "Rent".to_string(),
            transfer_account_id: None,
        };
        let result = reconcile(vec![pending("cc-1", 500)], &[ordinary]);
        assert_eq!(result.unscheduled_total, Amount::from_units(500));
    }

    #[test]
    fn test_transfer_to_unknown_account_ignored() {
        let result = reconcile(vec![pending("cc-1", 500)], &[transfer("cc-2", -500)]);
        assert_eq!(result.unscheduled_total, Amount::from_units(500));
    }

    #[test]
    fn test_multiple_payments_keep_provider_order() {
        let result = reconcile(
            vec![pending("cc-1", 100), pending("cc-2", 250)],
            &[transfer("cc-2", -250)],
        );
        assert_eq!(result.residual.len(), 1);
        assert_eq!(result.residual[0].account_id, "cc-1");
        assert_eq!(result.unscheduled_total, Amount::from_units(100));
    }

    #[test]
    fn test_near_zero_residue_is_dropped() {
        // A leftover of 0.004 is rounding noise, not a real debt.
        let mut payment = pending("cc-1", 0);
        payment.amount = Amount::from_milliunits(500_004);
        let result = reconcile(vec![payment], &[transfer("cc-1", -500)]);
        assert!(result.residual.is_empty());
        assert!(result.unscheduled_total.is_zero());
    }
}
