//! Domain and wire types shared across the program.

mod amount;
mod frequency;
pub mod ynab;

pub use amount::Amount;
pub use frequency::{Frequency, RecurrenceSpec};
