//! Repository layer over the key-value persistence port.
//!
//! # Responsibility
//! - Keep the in-memory record collection and its persisted copy in step.
//! - Return semantic errors (`NotFound`, `Validation`) next to storage errors.
//!
//! # Invariants
//! - Write paths validate input before anything is persisted.

pub mod record_store;
