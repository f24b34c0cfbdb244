//! Domain model for birthday records and local accounts.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep wire names compatible with the persisted key-value layout.
//!
//! # Invariants
//! - Every birthday record is identified by a stable `RecordId`.
//! - Deletion is a hard removal from the persisted collection.

pub mod account;
pub mod record;
