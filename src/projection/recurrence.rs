//! Expansion of a recurrence rule into concrete dates within a window.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{add_months, days_in_month};
use crate::model::{Frequency, RecurrenceSpec};

/// Expands a recurrence into every occurrence date inside
/// `[start, end]` inclusive.
///
/// The result is ascending and deduplicated. A one-time (or unrecognized)
/// frequency yields the anchor itself when it falls inside the window. This
/// is a pure function of its arguments.
pub fn expand(spec: RecurrenceSpec, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    match spec.frequency {
        Frequency::Never => {
            if spec.anchor >= start && spec.anchor <= end {
                vec![spec.anchor]
            } else {
                Vec::new()
            }
        }
        Frequency::TwiceAMonth => expand_twice_a_month(spec, start, end),
        stepped => {
            let mut dates = Vec::new();
            let mut date = spec.anchor;
            while date <= end {
                if date >= start {
                    dates.push(date);
                }
                match stepped.step(date) {
                    Some(next) => date = next,
                    None => break,
                }
            }
            dates
        }
    }
}

/// Twice-a-month occurrences: the anchor's day-of-month paired with that day
/// plus or minus fifteen, for every month touching the window.
///
/// The walk starts one month before the window so a paired day late in the
/// prior month cannot be missed. Target days are clamped to each month's
/// length, then window-filtered, deduplicated and sorted.
fn expand_twice_a_month(spec: RecurrenceSpec, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let day1 = spec.anchor_day();
    let day2 = Frequency::paired_day(day1);

    let mut dates = Vec::new();
    // First of the month before the window start.
    let mut month = add_months(start.with_day(1).unwrap_or(start), -1);
    while month <= end {
        let last_day = days_in_month(month.year(), month.month());
        for target in [day1, day2] {
            let clamped = target.min(last_day);
            if let Some(candidate) =
                NaiveDate::from_ymd_opt(month.year(), month.month(), clamped)
            {
                if candidate >= start && candidate <= end {
                    dates.push(candidate);
                }
            }
        }
        month = add_months(month, 1);
    }
    dates.sort_unstable();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn spec(anchor: NaiveDate, frequency: Frequency) -> RecurrenceSpec {
        RecurrenceSpec::new(anchor, frequency)
    }

    #[test]
    fn test_one_time_inside_window() {
        let dates = expand(
            spec(d(2025, 8, 15), Frequency::Never),
            d(2025, 8, 1),
            d(2025, 8, 31),
        );
        assert_eq!(dates, vec![d(2025, 8, 15)]);
    }

    #[test]
    fn test_one_time_outside_window() {
        let dates = expand(
            spec(d(2025, 9, 15), Frequency::Never),
            d(2025, 8, 1),
            d(2025, 8, 31),
        );
        assert!(dates.is_empty());
    }

    #[test]
    fn test_weekly() {
        let dates = expand(
            spec(d(2025, 8, 4), Frequency::Weekly),
            d(2025, 8, 1),
            d(2025, 8, 31),
        );
        assert_eq!(
            dates,
            vec![d(2025, 8, 4), d(2025, 8, 11), d(2025, 8, 18), d(2025, 8, 25)]
        );
    }

    #[test]
    fn test_daily_skips_steps_before_window_start() {
        // Anchor before the window: steps prior to the window are dropped.
        let dates = expand(
            spec(d(2025, 7, 30), Frequency::Daily),
            d(2025, 8, 1),
            d(2025, 8, 3),
        );
        assert_eq!(dates, vec![d(2025, 8, 1), d(2025, 8, 2), d(2025, 8, 3)]);
    }

    #[test]
    fn test_monthly_clamps_month_end() {
        let dates = expand(
            spec(d(2024, 1, 31), Frequency::Monthly),
            d(2024, 1, 1),
            d(2024, 4, 30),
        );
        assert_eq!(
            dates,
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]
        );
    }

    #[test]
    fn test_every_other_week() {
        let dates = expand(
            spec(d(2025, 8, 1), Frequency::EveryOtherWeek),
            d(2025, 8, 1),
            d(2025, 8, 31),
        );
        assert_eq!(dates, vec![d(2025, 8, 1), d(2025, 8, 15), d(2025, 8, 29)]);
    }

    #[test]
    fn test_yearly_single_occurrence_in_window() {
        let dates = expand(
            spec(d(2025, 8, 20), Frequency::Yearly),
            d(2025, 8, 1),
            d(2025, 12, 31),
        );
        assert_eq!(dates, vec![d(2025, 8, 20)]);
    }

    #[test]
    fn test_twice_a_month_day_five_pairs_with_twenty() {
        let dates = expand(
            spec(d(2025, 8, 5), Frequency::TwiceAMonth),
            d(2025, 8, 1),
            d(2025, 9, 30),
        );
        assert_eq!(
            dates,
            vec![d(2025, 8, 5), d(2025, 8, 20), d(2025, 9, 5), d(2025, 9, 20)]
        );
    }

    #[test]
    fn test_twice_a_month_look_back_catches_prior_month_pair() {
        // Anchor day 16 pairs with day 1. A window starting mid-month must
        // still include the day from the generation month before it.
        let dates = expand(
            spec(d(2025, 8, 16), Frequency::TwiceAMonth),
            d(2025, 8, 16),
            d(2025, 9, 15),
        );
        assert_eq!(dates, vec![d(2025, 8, 16), d(2025, 9, 1)]);
    }

    #[test]
    fn test_twice_a_month_clamps_to_short_month() {
        // Day 15 pairs with day 30, which clamps to Feb 28 in 2023.
        let dates = expand(
            spec(d(2023, 2, 15), Frequency::TwiceAMonth),
            d(2023, 2, 1),
            d(2023, 2, 28),
        );
        assert_eq!(dates, vec![d(2023, 2, 15), d(2023, 2, 28)]);
    }

    #[test]
    fn test_all_frequencies_sorted_deduped_in_window() {
        let start = d(2025, 8, 1);
        let end = d(2026, 8, 1);
        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::EveryOtherWeek,
            Frequency::Every4Weeks,
            Frequency::Monthly,
            Frequency::EveryOtherMonth,
            Frequency::Every3Months,
            Frequency::Every4Months,
            Frequency::TwiceAMonth,
            Frequency::TwiceAYear,
            Frequency::Yearly,
            Frequency::EveryOtherYear,
            Frequency::Never,
        ] {
            let dates = expand(spec(d(2025, 8, 14), frequency), start, end);
            for pair in dates.windows(2) {
                assert!(pair[0] < pair[1], "{frequency} not strictly ascending");
            }
            for date in &dates {
                assert!(*date >= start && *date <= end, "{frequency} left window");
            }
        }
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let s = spec(d(2025, 8, 3), Frequency::TwiceAMonth);
        let a = expand(s, d(2025, 8, 1), d(2025, 10, 31));
        let b = expand(s, d(2025, 8, 1), d(2025, 10, 31));
        assert_eq!(a, b);
    }
}
