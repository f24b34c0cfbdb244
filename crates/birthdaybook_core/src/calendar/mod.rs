//! Date arithmetic and month grid construction.
//!
//! # Responsibility
//! - Compute next occurrences and day distances for yearly birthdays.
//! - Bucket records into month grids for calendar views.
//!
//! # Invariants
//! - Functions here are pure; they take `today` explicitly and never read a
//!   clock or storage.

pub mod builder;
pub mod date_math;
