//! Filtering, sorting and summary queries.

use crate::calendar::date_math::{days_until, next_occurrence};
use crate::model::record::BirthdayRecord;
use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Month filter selected in the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    /// 1-based month.
    Month(u32),
}

impl MonthFilter {
    /// Validated single-month filter.
    pub fn month(month: u32) -> Result<Self, MonthFilterError> {
        if (1..=12).contains(&month) {
            Ok(Self::Month(month))
        } else {
            Err(MonthFilterError(month.to_string()))
        }
    }

    fn accepts(self, record: &BirthdayRecord) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => record.birth_month() == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = MonthFilterError;

    /// Accepts `all` or a month number `1..=12`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<u32>()
            .map_err(|_| MonthFilterError(trimmed.to_string()))
            .and_then(Self::month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthFilterError(pub String);

impl Display for MonthFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "month filter must be `all` or 1..=12, got `{}`", self.0)
    }
}

impl Error for MonthFilterError {}

/// Combined list-view query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub month: MonthFilter,
    /// Case-insensitive name substring; blank means no filter.
    pub search: String,
}

impl ListQuery {
    /// Sorts by month/day, then applies the month filter, then the name filter.
    pub fn apply(&self, records: &[BirthdayRecord]) -> Vec<BirthdayRecord> {
        let sorted = sorted_by_upcoming(records);
        let by_month = filter_by_month(&sorted, self.month);
        filter_by_name_contains(&by_month, &self.search)
    }
}

/// Stable sort by birthdate (month, day); ties keep input order.
pub fn sorted_by_upcoming(records: &[BirthdayRecord]) -> Vec<BirthdayRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| (record.birth_month(), record.birth_day()));
    sorted
}

pub fn filter_by_month(records: &[BirthdayRecord], filter: MonthFilter) -> Vec<BirthdayRecord> {
    records
        .iter()
        .filter(|record| filter.accepts(record))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on `name`; a blank query keeps everything.
pub fn filter_by_name_contains(records: &[BirthdayRecord], query: &str) -> Vec<BirthdayRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Record with the earliest next occurrence, with its date and distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upcoming {
    pub record: BirthdayRecord,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Earliest next occurrence on or after `today`; ties go to the first record.
pub fn next_upcoming(records: &[BirthdayRecord], today: NaiveDate) -> Option<Upcoming> {
    let mut best: Option<(&BirthdayRecord, NaiveDate)> = None;
    for record in records {
        let date = next_occurrence(record.birthdate, today);
        if best.map_or(true, |(_, best_date)| date < best_date) {
            best = Some((record, date));
        }
    }

    best.map(|(record, date)| Upcoming {
        record: record.clone(),
        date,
        days_until: days_until(date, today),
    })
}

/// Records whose birthdate month/day equals today's.
pub fn todays_birthdays(records: &[BirthdayRecord], today: NaiveDate) -> Vec<BirthdayRecord> {
    records
        .iter()
        .filter(|record| record.falls_on(today.month(), today.day()))
        .cloned()
        .collect()
}
