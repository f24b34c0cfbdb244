//! Occurrence arithmetic for yearly birthdays.
//!
//! # Invariants
//! - Only month/day of a birthdate decide when it recurs.
//! - Dates are local calendar dates; there is no time-of-day component.
//! - A Feb 29 birthdate occurs on Mar 1 in non-leap years.

use chrono::{Datelike, NaiveDate};

/// Date on which `birthdate` recurs in `year`.
///
/// Feb 29 rolls over to Mar 1 when `year` has no leap day. Returns `None`
/// only when `year` is outside chrono's supported range.
pub fn occurrence_in_year(birthdate: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthdate.month(), birthdate.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Next occurrence on or after `today`.
///
/// When month/day equals today's, the occurrence is `today` itself.
pub fn next_occurrence(birthdate: NaiveDate, today: NaiveDate) -> NaiveDate {
    match occurrence_in_year(birthdate, today.year()) {
        Some(this_year) if this_year >= today => this_year,
        _ => occurrence_in_year(birthdate, today.year() + 1).unwrap_or(NaiveDate::MAX),
    }
}

/// Whole days from `today` until `date`; negative when `date` is past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Completed years of age on `on`, or `None` when `on` precedes the birthdate.
pub fn age_on(birthdate: NaiveDate, on: NaiveDate) -> Option<u32> {
    if on < birthdate {
        return None;
    }
    let mut years = on.year() - birthdate.year();
    let had_birthday = occurrence_in_year(birthdate, on.year()).is_some_and(|day| day <= on);
    if !had_birthday {
        years -= 1;
    }
    u32::try_from(years).ok()
}
