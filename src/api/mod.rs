//! Access to the YNAB budget data this program projects from.
//!
//! The `BudgetClient` trait is the seam between the projection pipeline and
//! the outside world. The real implementation talks to the YNAB v1 REST API;
//! the test implementation serves seeded in-memory data and is compiled even
//! in the production binary so the whole program can run without network
//! access.

mod snapshot;
mod test_client;
mod ynab;

use std::error::Error as StdError;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use reqwest::StatusCode;

use crate::model::ynab::{Account, CategoryGroup, ScheduledTransaction};
use crate::{Config, Result};

pub use snapshot::{fetch_snapshot, Snapshot};
pub(crate) use test_client::TestBudget;

/// Selects the budget data source. When `YNAB_MONITOR_IN_TEST_MODE` is set
/// and non-zero in length the mode will be `Mode::Test`, otherwise
/// `Mode::Ynab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ynab,
    Test,
}

impl Mode {
    pub fn from_env() -> Mode {
        match std::env::var("YNAB_MONITOR_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Ynab,
        }
    }
}

/// Read access to the budget snapshot data the projection needs.
#[async_trait::async_trait]
pub trait BudgetClient: Send + Sync {
    /// Fetches one account by id.
    async fn account(&self, account_id: &str) -> Result<Account>;

    /// Fetches all accounts in the budget.
    async fn accounts(&self) -> Result<Vec<Account>>;

    /// Fetches all scheduled transactions in the budget.
    async fn scheduled_transactions(&self) -> Result<Vec<ScheduledTransaction>>;

    /// Fetches all category groups with their categories.
    async fn category_groups(&self) -> Result<Vec<CategoryGroup>>;
}

/// Creates a `BudgetClient` for the given mode.
pub fn client(config: &Config, mode: Mode) -> Box<dyn BudgetClient> {
    match mode {
        Mode::Ynab => Box::new(ynab::YnabApi::new(config.api_token(), config.budget_id())),
        Mode::Test => Box::new(TestBudget::default()),
    }
}

/// A failure while talking to the budget provider: either a non-success
/// HTTP response or a transport error. The projection never retries these;
/// retry policy belongs to the caller.
#[derive(Debug)]
pub struct ProviderError {
    status: Option<StatusCode>,
    message: String,
    source: Option<reqwest::Error>,
}

impl ProviderError {
    /// A non-success response from the provider.
    pub(crate) fn http(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: body.into(),
            source: None,
        }
    }

    /// A transport-level failure (connection, TLS, timeout).
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self {
            status: source.status(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// The HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "YNAB API error ({}): {}", status.as_u16(), self.message),
            None => write!(f, "Network error: {}", self.message),
        }
    }
}

impl StdError for ProviderError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn StdError + 'static))
    }
}
