//! List queries over record snapshots.
//!
//! # Responsibility
//! - Sort, filter and summarize snapshots taken from `RecordStore::list`.
//!
//! # Invariants
//! - Inputs are never mutated; every function returns new vectors.
//! - Display order sorts by raw birthdate month/day, not by days until the
//!   next occurrence. A birthday that already passed this year still sorts by
//!   its calendar position.
//!
//! # See also
//! - `calendar::date_math` for occurrence arithmetic.

pub mod list;

pub use list::{
    filter_by_month, filter_by_name_contains, next_upcoming, sorted_by_upcoming,
    todays_birthdays, ListQuery, MonthFilter, MonthFilterError, Upcoming,
};
