//! The closed set of YNAB scheduled-transaction repetition codes.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;

/// How a scheduled transaction repeats.
///
/// The string forms match the YNAB API frequency codes exactly. Codes this
/// program does not know about deserialize as `Never` so that new provider
/// codes degrade to a one-time occurrence instead of failing the projection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Daily,
    Weekly,
    EveryOtherWeek,
    Every4Weeks,
    Monthly,
    EveryOtherMonth,
    Every3Months,
    Every4Months,
    TwiceAMonth,
    TwiceAYear,
    Yearly,
    EveryOtherYear,
    #[default]
    #[serde(other)]
    Never,
}

serde_plain::derive_display_from_serialize!(Frequency);
serde_plain::derive_fromstr_from_deserialize!(Frequency);

impl Frequency {
    /// Returns the next occurrence after `from`, or `None` for the variants
    /// with no fixed step (`Never`, and `TwiceAMonth` which is generated by
    /// day-of-month rather than by stepping).
    ///
    /// Every step strictly advances the date, which is what guarantees the
    /// expansion walk terminates.
    pub fn step(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => Some(from + Days::new(1)),
            Frequency::Weekly => Some(from + Days::new(7)),
            Frequency::EveryOtherWeek => Some(from + Days::new(14)),
            Frequency::Every4Weeks => Some(from + Days::new(28)),
            Frequency::Monthly => Some(add_months(from, 1)),
            Frequency::EveryOtherMonth => Some(add_months(from, 2)),
            Frequency::Every3Months => Some(add_months(from, 3)),
            Frequency::Every4Months => Some(add_months(from, 4)),
            Frequency::TwiceAYear => Some(add_months(from, 6)),
            Frequency::Yearly => Some(add_months(from, 12)),
            Frequency::EveryOtherYear => Some(add_months(from, 24)),
            Frequency::TwiceAMonth | Frequency::Never => None,
        }
    }

    /// Returns true for a transaction that occurs exactly once.
    pub fn is_one_time(&self) -> bool {
        matches!(self, Frequency::Never)
    }

    /// The second day-of-month paired with an anchor day for `TwiceAMonth`.
    ///
    /// YNAB's true twice-a-month rule is not published; this pairs the
    /// anchor's day with that day plus or minus fifteen, which matches the
    /// common 1st/15th and 5th/20th setups.
    pub fn paired_day(anchor_day: u32) -> u32 {
        if anchor_day <= 15 {
            anchor_day + 15
        } else {
            anchor_day - 15
        }
    }
}

/// A scheduled transaction's repetition rule: the next known occurrence plus
/// how it repeats from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub anchor: NaiveDate,
    pub frequency: Frequency,
}

impl RecurrenceSpec {
    pub fn new(anchor: NaiveDate, frequency: Frequency) -> Self {
        Self { anchor, frequency }
    }

    /// The anchor's day-of-month, used by the `TwiceAMonth` expansion.
    pub fn anchor_day(&self) -> u32 {
        self.anchor.day()
    }
}
