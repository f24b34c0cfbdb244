//! Month grid bucketing for calendar rendering.
//!
//! # Responsibility
//! - Compute the leading blank cells and per-day record buckets of a month.
//! - Answer day-click detail lookups.
//! - Step between months for navigation.
//!
//! # Invariants
//! - `days` has exactly one entry per day of the month, leap years included.
//! - Records are matched on birthdate month/day only; the birth year is ignored.
//! - Records inside a bucket keep the order of the input slice.

use crate::model::record::BirthdayRecord;
use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DAYS_PER_WEEK: usize = 7;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth(u32),
    InvalidDay { year: i32, month: u32, day: u32 },
    YearOutOfRange(i32),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be within 1..=12, got {month}"),
            Self::InvalidDay { year, month, day } => {
                write!(f, "{year}-{month:02}-{day:02} is not a calendar date")
            }
            Self::YearOutOfRange(year) => write!(f, "year {year} is out of supported range"),
        }
    }
}

impl Error for CalendarError {}

/// A calendar month, used for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a validated year/month pair.
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        first_day(year, month)?;
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based month.
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of days in this month.
    pub fn day_count(self) -> u32 {
        days_in_month(self.year, self.month).unwrap_or(0)
    }
}

/// One day cell with its matching records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub records: Vec<BirthdayRecord>,
}

impl CalendarDay {
    pub fn has_birthdays(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Month grid ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1; weekday index of day 1 with Sunday = 0.
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// Splits cells into week rows of seven; `None` marks a blank cell.
    ///
    /// The last row is padded with blanks.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = Vec::with_capacity(
            self.leading_blanks + self.days.len() + DAYS_PER_WEEK,
        );
        cells.extend(std::iter::repeat(None).take(self.leading_blanks));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % DAYS_PER_WEEK != 0 {
            cells.push(None);
        }
        cells
            .chunks(DAYS_PER_WEEK)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Day cell by 1-based day number.
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.iter().find(|cell| cell.day == day)
    }
}

/// Name/birthdate pair shown when a day cell is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetailEntry {
    pub name: String,
    pub birthdate: NaiveDate,
}

/// Buckets `records` into the days of `year`/`month`.
///
/// # Errors
/// - `InvalidMonth` when `month` is outside 1..=12.
pub fn build(year: i32, month: u32, records: &[BirthdayRecord]) -> CalendarResult<CalendarGrid> {
    let first = first_day(year, month)?;
    let day_count = days_in_month(year, month)?;

    let days = (1..=day_count)
        .map(|day| CalendarDay {
            day,
            records: records
                .iter()
                .filter(|record| record.falls_on(month, day))
                .cloned()
                .collect(),
        })
        .collect();

    Ok(CalendarGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday() as usize,
        days,
    })
}

/// Records recurring on `year`/`month`/`day`; empty when none match.
///
/// # Errors
/// - `InvalidMonth` / `InvalidDay` when the date does not exist.
pub fn day_detail(
    year: i32,
    month: u32,
    day: u32,
    records: &[BirthdayRecord],
) -> CalendarResult<Vec<DayDetailEntry>> {
    first_day(year, month)?;
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(CalendarError::InvalidDay { year, month, day });
    }

    Ok(records
        .iter()
        .filter(|record| record.falls_on(month, day))
        .map(|record| DayDetailEntry {
            name: record.name.clone(),
            birthdate: record.birthdate,
        })
        .collect())
}

/// Days in `year`/`month`.
pub fn days_in_month(year: i32, month: u32) -> CalendarResult<u32> {
    let first = first_day(year, month)?;
    let next_first = YearMonth { year, month }.next();
    let following = NaiveDate::from_ymd_opt(next_first.year, next_first.month, 1)
        .ok_or(CalendarError::YearOutOfRange(next_first.year))?;
    let days = (following - first).num_days();
    u32::try_from(days).map_err(|_| CalendarError::YearOutOfRange(year))
}

fn first_day(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange(year))
}

#[cfg(test)]
mod tests {
    use super::{build, day_detail, days_in_month, CalendarError, YearMonth};
    use crate::model::record::{BirthdayRecord, RecordDraft};
    use chrono::{Datelike, NaiveDate};
    use uuid::Uuid;

    fn record(name: &str, birthdate: &str) -> BirthdayRecord {
        let draft = RecordDraft::new(name, "x@example.com", "", birthdate);
        BirthdayRecord::from_draft(Uuid::now_v7(), &draft).expect("valid record")
    }

    #[test]
    fn january_2024_starts_on_monday_with_31_days() {
        let grid = build(2024, 1, &[]).expect("grid");
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        assert_eq!(
            grid.leading_blanks,
            first.weekday().num_days_from_sunday() as usize
        );
        assert_eq!(grid.leading_blanks, 1);
        assert_eq!(grid.days.len(), 31);
        assert_eq!(grid.days.first().map(|d| d.day), Some(1));
        assert_eq!(grid.days.last().map(|d| d.day), Some(31));
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(build(2024, 2, &[]).expect("grid").days.len(), 29);
        assert_eq!(build(2023, 2, &[]).expect("grid").days.len(), 28);
        assert_eq!(days_in_month(1900, 2), Ok(28));
        assert_eq!(days_in_month(2000, 2), Ok(29));
        assert_eq!(days_in_month(2024, 12), Ok(31));
    }

    #[test]
    fn buckets_records_by_month_and_day_ignoring_year() {
        let records = vec![
            record("Ana Souza", "1990-06-15"),
            record("Bruno", "2001-06-15"),
            record("Carla", "1985-07-15"),
            record("Davi", "1970-06-01"),
        ];
        let grid = build(2024, 6, &records).expect("grid");

        let fifteenth = grid.day(15).expect("day 15");
        let names = fifteenth
            .records
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Ana Souza", "Bruno"]);
        assert_eq!(grid.day(1).expect("day 1").records[0].name, "Davi");
        assert!(!grid.day(2).expect("day 2").has_birthdays());

        let total: usize = grid.days.iter().map(|d| d.records.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn leap_day_birthdays_only_show_in_leap_februaries() {
        let records = vec![record("Leap", "2000-02-29")];
        let leap = build(2024, 2, &records).expect("grid");
        assert!(leap.day(29).expect("day 29").has_birthdays());

        let common = build(2025, 2, &records).expect("grid");
        assert!(common.days.iter().all(|d| !d.has_birthdays()));
        let march = build(2025, 3, &records).expect("grid");
        assert!(march.days.iter().all(|d| !d.has_birthdays()));
    }

    #[test]
    fn weeks_pad_to_full_rows() {
        let grid = build(2024, 1, &[]).expect("grid");
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|row| row.len() == 7));
        assert!(weeks[0][0].is_none());
        assert_eq!(weeks[0][1].map(|d| d.day), Some(1));
        assert_eq!(weeks[4][3].map(|d| d.day), Some(31));
        assert!(weeks[4][4].is_none());
    }

    #[test]
    fn rejects_invalid_month() {
        assert_eq!(build(2024, 13, &[]), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(build(2024, 0, &[]), Err(CalendarError::InvalidMonth(0)));
    }

    #[test]
    fn day_detail_lists_matches_or_nothing() {
        let records = vec![
            record("Ana", "1990-06-15"),
            record("Bruno", "2001-06-15"),
        ];
        let detail = day_detail(2024, 6, 15, &records).expect("detail");
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0].name, "Ana");
        assert_eq!(
            detail[0].birthdate,
            NaiveDate::from_ymd_opt(1990, 6, 15).expect("date")
        );

        assert!(day_detail(2024, 6, 16, &records).expect("detail").is_empty());
        assert_eq!(
            day_detail(2023, 2, 29, &records),
            Err(CalendarError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn year_month_navigation_wraps_years() {
        let december = YearMonth::new(2024, 12).expect("valid");
        assert_eq!(december.next(), YearMonth::new(2025, 1).expect("valid"));
        assert_eq!(december.next().previous(), december);

        let january = YearMonth::of(NaiveDate::from_ymd_opt(2024, 1, 20).expect("date"));
        assert_eq!(january.previous(), YearMonth::new(2023, 12).expect("valid"));
        assert_eq!(january.day_count(), 31);
        assert!(YearMonth::new(2024, 13).is_err());
    }
}
