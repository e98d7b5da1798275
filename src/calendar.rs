//! Calendar arithmetic for recurrence expansion and window bounds.

use chrono::{Datelike, NaiveDate};

/// Adds `months` (which may be negative) to a date, clamping the day to the
/// last valid day of the target month. For example Jan 31 + 1 month is
/// Feb 28, or Feb 29 in a leap year.
pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    // year/month/day are valid by construction
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Returns the number of days in the given month, accounting for leap years.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Returns the last day of the month containing `date`. This is the default
/// projection window end when no explicit day count is configured.
pub(crate) fn end_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), day).unwrap_or(date)
}
