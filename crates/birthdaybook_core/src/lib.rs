//! Core domain logic for birthdaybook.
//! This crate is the single source of truth for record invariants and the
//! list/calendar queries built on them.

pub mod calendar;
pub mod config;
pub mod db;
pub mod display;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;
pub mod surface;

pub use calendar::builder::{
    build as build_calendar, day_detail, CalendarDay, CalendarError, CalendarGrid,
    DayDetailEntry, YearMonth,
};
pub use calendar::date_math::{age_on, days_until, next_occurrence, occurrence_in_year};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogInitError, LogTarget};
pub use model::account::UserAccount;
pub use model::record::{
    BirthdayRecord, RecordDraft, RecordField, RecordId, RecordPatch, RecordValidationError,
};
pub use query::{
    filter_by_month, filter_by_name_contains, next_upcoming, sorted_by_upcoming,
    todays_birthdays, ListQuery, MonthFilter, MonthFilterError, Upcoming,
};
pub use repo::record_store::{RecordStore, StoreError, StoreResult};
pub use service::account_service::{AccountError, AccountService};
pub use service::session::{SessionError, SessionGate};
pub use service::theme::{Theme, ThemePreference};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use surface::{Capability, CapabilityDenied, Surface};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
