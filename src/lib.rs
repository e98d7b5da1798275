mod api;
pub mod args;
mod calendar;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod notify;
pub mod projection;
mod schedule;

pub use api::{BudgetClient, Mode, ProviderError, Snapshot};
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use schedule::Schedule;
