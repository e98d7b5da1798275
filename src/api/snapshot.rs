//! Assembles the point-in-time snapshot the projection consumes.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::api::BudgetClient;
use crate::model::ynab::ScheduledTransaction;
use crate::model::Amount;
use crate::projection::PendingPayment;
use crate::Result;

/// The category group name YNAB uses for credit-card payment categories.
const CREDIT_CARD_PAYMENTS_GROUP: &str = "Credit Card Payments";

/// One consistent snapshot of everything a projection run needs. All
/// entities are transient; a fresh snapshot is fetched per cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub account_name: String,
    pub balance: Amount,
    pub scheduled: Vec<ScheduledTransaction>,
    pub pending: Vec<PendingPayment>,
}

/// Fetches the monitored account, the budget's scheduled transactions, and
/// the pending credit-card payments.
///
/// A pending payment is the positive available balance of a category in the
/// "Credit Card Payments" group whose name equals the name of an open,
/// non-deleted credit-card account. `category_filter`, when non-empty,
/// restricts the categories considered, matching by category id or name.
pub async fn fetch_snapshot(
    client: &dyn BudgetClient,
    account_id: &str,
    category_filter: &[String],
) -> Result<Snapshot> {
    let account = client.account(account_id).await?;
    let scheduled = client.scheduled_transactions().await?;
    let pending = fetch_pending_payments(client, category_filter).await?;

    debug!(
        "Snapshot for '{}': {} scheduled transactions, {} pending credit card payments",
        account.name,
        scheduled.len(),
        pending.len()
    );

    Ok(Snapshot {
        account_name: account.name,
        balance: Amount::from_milliunits(account.balance),
        scheduled,
        pending,
    })
}

async fn fetch_pending_payments(
    client: &dyn BudgetClient,
    category_filter: &[String],
) -> Result<Vec<PendingPayment>> {
    // Credit-card accounts are matched to payment categories by name.
    let accounts = client.accounts().await?;
    let cc_accounts: HashMap<String, String> = accounts
        .into_iter()
        .filter(|a| a.is_active_credit_card())
        .map(|a| (a.name, a.id))
        .collect();

    let groups = client.category_groups().await?;
    let mut pending = Vec::new();
    for group in groups {
        if group.name != CREDIT_CARD_PAYMENTS_GROUP {
            continue;
        }
        for category in group.categories {
            if category.deleted || category.hidden {
                continue;
            }
            if !category_filter.is_empty()
                && !category_filter.contains(&category.id)
                && !category_filter.contains(&category.name)
            {
                continue;
            }
            let available = Amount::from_milliunits(category.balance);
            let Some(cc_account_id) = cc_accounts.get(&category.name) else {
                continue;
            };
            if available.is_positive() {
                pending.push(PendingPayment {
                    account_id: cc_account_id.clone(),
                    name: category.name,
                    amount: available,
                });
            }
        }
    }
    Ok(pending)
}
