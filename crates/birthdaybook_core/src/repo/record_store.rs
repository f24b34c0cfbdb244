//! Birthday record store over the key-value persistence port.
//!
//! # Responsibility
//! - Own the `aniversariantes` key and the in-memory copy of its records.
//! - Provide create/update/delete/list with validation and unique ids.
//!
//! # Invariants
//! - Every mutation serializes the full collection before returning.
//! - The in-memory copy only changes after the write succeeded, so memory and
//!   medium never disagree after a failed mutation.
//! - Record ids are unique; persisted data with duplicates is rejected.

use crate::model::record::{
    BirthdayRecord, RecordDraft, RecordId, RecordPatch, RecordValidationError,
};
use crate::storage::{KeyValueStore, StorageError, RECORDS_KEY};
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store error taxonomy.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    NotFound(RecordId),
    Storage(StorageError),
    /// Persisted collection cannot be decoded or breaks an invariant.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "birthday record not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted records: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Source of truth for birthday records.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    records: Vec<BirthdayRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Loads the persisted collection, starting empty when nothing is stored.
    ///
    /// # Errors
    /// - `Storage` when the medium cannot be read.
    /// - `InvalidData` when the stored JSON is malformed or has duplicate ids.
    pub fn open(storage: S) -> StoreResult<Self> {
        let records = load_records(&storage)?;
        info!(
            "event=store_open module=store status=ok record_count={}",
            records.len()
        );
        Ok(Self { storage, records })
    }

    /// Validates `draft`, assigns a fresh id, appends and persists.
    pub fn create(&mut self, draft: &RecordDraft) -> StoreResult<BirthdayRecord> {
        let record = BirthdayRecord::from_draft(self.generate_id(), draft)?;

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit("record_create", next)?;

        Ok(record)
    }

    /// Applies the supplied patch fields to record `id` and persists.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent; the collection is left unchanged.
    pub fn update(&mut self, id: RecordId, patch: &RecordPatch) -> StoreResult<BirthdayRecord> {
        let index = self.position(id)?;
        let updated = self.records[index].patched(patch)?;

        let mut next = self.records.clone();
        next[index] = updated.clone();
        self.commit("record_update", next)?;

        Ok(updated)
    }

    /// Removes record `id` and persists; returns the removed record.
    ///
    /// Unknown ids fail with `NotFound` rather than being ignored.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<BirthdayRecord> {
        let index = self.position(id)?;

        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit("record_delete", next)?;

        Ok(removed)
    }

    /// Snapshot copy of all records in insertion order.
    pub fn list(&self) -> Vec<BirthdayRecord> {
        self.records.clone()
    }

    pub fn get(&self, id: RecordId) -> Option<BirthdayRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the in-memory copy with what the medium currently holds.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.records = load_records(&self.storage)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the medium, for fault injection in tests.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: RecordId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn generate_id(&self) -> RecordId {
        loop {
            let candidate = Uuid::now_v7();
            if self.records.iter().all(|record| record.id != candidate) {
                return candidate;
            }
        }
    }

    fn commit(&mut self, event: &str, next: Vec<BirthdayRecord>) -> StoreResult<()> {
        let encoded = serde_json::to_string(&next)
            .map_err(|err| StoreError::InvalidData(format!("failed to encode records: {err}")))?;

        if let Err(err) = self.storage.set(RECORDS_KEY, &encoded) {
            error!(
                "event={} module=store status=error record_count={} error={}",
                event,
                self.records.len(),
                err
            );
            return Err(err.into());
        }

        self.records = next;
        info!(
            "event={} module=store status=ok record_count={}",
            event,
            self.records.len()
        );
        Ok(())
    }
}

fn load_records<S: KeyValueStore>(storage: &S) -> StoreResult<Vec<BirthdayRecord>> {
    let Some(raw) = storage.get(RECORDS_KEY)? else {
        return Ok(Vec::new());
    };

    // A stored JSON `null` is treated like an absent key.
    let records: Vec<BirthdayRecord> = serde_json::from_str::<Option<Vec<BirthdayRecord>>>(&raw)
        .map_err(|err| StoreError::InvalidData(format!("`{RECORDS_KEY}` is not valid: {err}")))?
        .unwrap_or_default();

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        record.validate().map_err(|err| {
            StoreError::InvalidData(format!("record {} is invalid: {err}", record.id))
        })?;
        if !seen.insert(record.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate record id {}",
                record.id
            )));
        }
    }

    Ok(records)
}
