//! Implements `BudgetClient` against the YNAB v1 REST API.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::trace;

use crate::api::{BudgetClient, ProviderError};
use crate::model::ynab::{Account, CategoryGroup, ScheduledTransaction};
use crate::Result;

const YNAB_BASE: &str = "https://api.ynab.com/v1";

/// Talks to the YNAB API with a static bearer token. All endpoints used here
/// are GETs scoped to one budget.
pub(super) struct YnabApi {
    http: reqwest::Client,
    api_token: String,
    budget_id: String,
}

impl YnabApi {
    pub(super) fn new(api_token: impl Into<String>, budget_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token: api_token.into(),
            budget_id: budget_id.into(),
        }
    }

    /// Makes an authenticated GET request to a budget-scoped path and
    /// unwraps the YNAB `{"data": ...}` envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{YNAB_BASE}/budgets/{}{path}", self.budget_id);
        trace!("GET {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(ProviderError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(ProviderError::http(status, body).into());
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(ProviderError::transport)
            .with_context(|| format!("Failed to parse the response from {url}"))?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl BudgetClient for YnabApi {
    async fn account(&self, account_id: &str) -> Result<Account> {
        let data: AccountData = self.get(&format!("/accounts/{account_id}")).await?;
        Ok(data.account)
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        let data: AccountsData = self.get("/accounts").await?;
        Ok(data.accounts)
    }

    async fn scheduled_transactions(&self) -> Result<Vec<ScheduledTransaction>> {
        let data: ScheduledTransactionsData = self.get("/scheduled_transactions").await?;
        Ok(data.scheduled_transactions)
    }

    async fn category_groups(&self) -> Result<Vec<CategoryGroup>> {
        let data: CategoriesData = self.get("/categories").await?;
        Ok(data.category_groups)
    }
}

/// Every YNAB response nests its payload under a `data` key.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    account: Account,
}

#[derive(Debug, Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct ScheduledTransactionsData {
    scheduled_transactions: Vec<ScheduledTransaction>,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    category_groups: Vec<CategoryGroup>,
}
