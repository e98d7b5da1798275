//! Implements the `BudgetClient` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so
//! that we can run the whole program, top-to-bottom, without touching the
//! YNAB API.

use anyhow::Context;
use chrono::{Days, Local};

use crate::api::BudgetClient;
use crate::model::ynab::{Account, CategoryGroup, ScheduledTransaction};
use crate::model::Frequency;
use crate::Result;

/// A `BudgetClient` that serves data held in memory. By default it is seeded
/// with a small, coherent budget: one checking account, two credit cards
/// with pending payment categories, and a handful of scheduled transactions
/// anchored relative to the current date.
pub(crate) struct TestBudget {
    accounts: Vec<Account>,
    scheduled: Vec<ScheduledTransaction>,
    category_groups: Vec<CategoryGroup>,
}

impl TestBudget {
    pub(crate) fn new(
        accounts: Vec<Account>,
        scheduled: Vec<ScheduledTransaction>,
        category_groups: Vec<CategoryGroup>,
    ) -> Self {
        Self {
            accounts,
            scheduled,
            category_groups,
        }
    }
}

#[async_trait::async_trait]
impl BudgetClient for TestBudget {
    async fn account(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .with_context(|| format!("Account '{account_id}' not found"))
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn scheduled_transactions(&self) -> Result<Vec<ScheduledTransaction>> {
        Ok(self.scheduled.clone())
    }

    async fn category_groups(&self) -> Result<Vec<CategoryGroup>> {
        Ok(self.category_groups.clone())
    }
}

impl Default for TestBudget {
    fn default() -> Self {
        Self::new(seed_accounts(), seed_scheduled(), seed_category_groups())
    }
}

/// The checking account id used by the default seed data.
pub(crate) const CHECKING_ID: &str = "acct-checking";
const VISA_ID: &str = "acct-visa";
const AMEX_ID: &str = "acct-amex";

/// Seed account data.
fn seed_accounts() -> Vec<Account> {
    serde_json::from_str(ACCOUNT_DATA).unwrap()
}

/// Seed category data.
fn seed_category_groups() -> Vec<CategoryGroup> {
    serde_json::from_str(CATEGORY_DATA).unwrap()
}

/// Seed scheduled transactions, anchored relative to today so that the
/// projection window always contains them.
fn seed_scheduled() -> Vec<ScheduledTransaction> {
    let today = Local::now().date_naive();
    let txn = |id: &str, days: u64, amount: i64, payee: &str| ScheduledTransaction {
        id: id.to_string(),
        account_id: CHECKING_ID.to_string(),
        date_first: None,
        date_next: Some(today + Days::new(days)),
        frequency: Some(Frequency::Never),
        amount,
        payee_name: Some(payee.to_string()),
        transfer_account_id: None,
        deleted: false,
    };

    let mut rent = txn("st-rent", 2, -1_800_000, "Landlord");
    rent.frequency = Some(Frequency::Monthly);

    let mut paycheck = txn("st-paycheck", 5, 3_000_000, "Employer");
    paycheck.frequency = Some(Frequency::EveryOtherWeek);

    let mut visa_payment = txn("st-visa", 7, -600_000, "Transfer : Visa");
    visa_payment.transfer_account_id = Some(VISA_ID.to_string());

    let mut deleted = txn("st-deleted", 1, -9_999_000, "Ghost");
    deleted.deleted = true;

    let mut other_account = txn("st-other", 1, -50_000, "Elsewhere");
    other_account.account_id = "acct-savings".to_string();

    vec![rent, paycheck, visa_payment, deleted, other_account]
}

const ACCOUNT_DATA: &str = r#"[
    {
        "id": "acct-checking",
        "name": "Checking",
        "type": "checking",
        "balance": 2450000,
        "closed": false,
        "deleted": false
    },
    {
        "id": "acct-visa",
        "name": "Visa",
        "type": "creditCard",
        "balance": -600000,
        "closed": false,
        "deleted": false
    },
    {
        "id": "acct-amex",
        "name": "Amex",
        "type": "creditCard",
        "balance": -250000,
        "closed": false,
        "deleted": false
    },
    {
        "id": "acct-old-card",
        "name": "Old Card",
        "type": "creditCard",
        "balance": 0,
        "closed": true,
        "deleted": false
    }
]"#;

const CATEGORY_DATA: &str = r#"[
    {
        "id": "group-immediate",
        "name": "Immediate Obligations",
        "hidden": false,
        "deleted": false,
        "categories": [
            {"id": "cat-rent", "name": "Rent", "balance": 1800000, "hidden": false, "deleted": false}
        ]
    },
    {
        "id": "group-cc",
        "name": "Credit Card Payments",
        "hidden": false,
        "deleted": false,
        "categories": [
            {"id": "cat-visa", "name": "Visa", "balance": 600000, "hidden": false, "deleted": false},
            {"id": "cat-amex", "name": "Amex", "balance": 250000, "hidden": false, "deleted": false},
            {"id": "cat-old-card", "name": "Old Card", "balance": 100000, "hidden": true, "deleted": false}
        ]
    }
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_data_is_coherent() {
        let budget = TestBudget::default();
        let checking = budget.account(CHECKING_ID).await.unwrap();
        assert_eq!(checking.name, "Checking");
        assert_eq!(checking.balance, 2_450_000);

        let credit_cards: Vec<Account> = budget
            .accounts()
            .await
            .unwrap()
            .into_iter()
            .filter(Account::is_active_credit_card)
            .collect();
        assert_eq!(credit_cards.len(), 2);

        let scheduled = budget.scheduled_transactions().await.unwrap();
        assert_eq!(scheduled.len(), 5);

        let groups = budget.category_groups().await.unwrap();
        assert!(groups.iter().any(|g| g.name == "Credit Card Payments"));
    }

    #[tokio::test]
    async fn test_unknown_account_errors() {
        let budget = TestBudget::default();
        assert!(budget.account("acct-nope").await.is_err());
    }
}
