//! Wire types for the YNAB v1 REST API payloads consumed by this program.
//!
//! Monetary fields are milliunit integers (1 currency unit = 1000
//! milliunits) and are converted to [`Amount`](super::Amount) at the
//! projection boundary, never here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// The YNAB account type string for credit-card accounts.
pub const CREDIT_CARD_TYPE: &str = "creditCard";

/// One budget account as returned by `/budgets/{id}/accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    /// Current balance in milliunits.
    pub balance: i64,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Account {
    /// Returns true for an open, non-deleted credit-card account.
    pub fn is_active_credit_card(&self) -> bool {
        self.account_type == CREDIT_CARD_TYPE && !self.closed && !self.deleted
    }
}

/// One scheduled transaction as returned by
/// `/budgets/{id}/scheduled_transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransaction {
    pub id: String,
    pub account_id: String,
    /// The first occurrence the user entered.
    #[serde(default)]
    pub date_first: Option<NaiveDate>,
    /// The next upcoming occurrence, maintained by the provider.
    #[serde(default)]
    pub date_next: Option<NaiveDate>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    /// Signed amount in milliunits; outflows are negative.
    pub amount: i64,
    #[serde(default)]
    pub payee_name: Option<String>,
    /// Set when this transaction transfers funds to another account.
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl ScheduledTransaction {
    /// The repetition code, defaulting to one-time when the provider sent
    /// none.
    pub fn frequency(&self) -> Frequency {
        self.frequency.unwrap_or_default()
    }

    /// The payee display name, or a placeholder when the provider sent none.
    pub fn payee(&self) -> &str {
        self.payee_name.as_deref().unwrap_or("Unknown")
    }
}

/// One category inside a category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Available balance in milliunits.
    pub balance: i64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// One category group with its categories, as returned by
/// `/budgets/{id}/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_transaction_deserialize() {
        let json = r#"{
            "id": "st-1",
            "account_id": "acct-1",
            "date_first": "2025-01-01",
            "date_next": "2025-08-01",
            "frequency": "monthly",
            "amount": -1800000,
            "payee_name": "Landlord",
            "transfer_account_id": null,
            "deleted": false
        }"#;
        let txn: ScheduledTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.frequency(), Frequency::Monthly);
        assert_eq!(txn.payee(), "Landlord");
        assert_eq!(txn.amount, -1_800_000);
        assert_eq!(
            txn.date_next,
            NaiveDate::from_ymd_opt(2025, 8, 1)
        );
    }

    #[test]
    fn test_scheduled_transaction_missing_optionals() {
        let json = r#"{"id": "st-2", "account_id": "acct-1", "amount": 100}"#;
        let txn: ScheduledTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.frequency(), Frequency::Never);
        assert_eq!(txn.payee(), "Unknown");
        assert!(txn.date_first.is_none());
        assert!(txn.date_next.is_none());
        assert!(!txn.deleted);
    }

    #[test]
    fn test_account_credit_card_detection() {
        let account = Account {
            id: "a".into(),
            name: "Visa".into(),
            account_type: CREDIT_CARD_TYPE.into(),
            balance: -250_000,
            closed: false,
            deleted: false,
        };
        assert!(account.is_active_credit_card());

        let closed = Account {
            closed: true,
            ..account.clone()
        };
        assert!(!closed.is_active_credit_card());

        let checking = Account {
            account_type: "checking".into(),
            ..account
        };
        assert!(!checking.is_active_credit_card());
    }
}
