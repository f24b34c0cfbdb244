//! Key-value persistence port shared by every store in core.
//!
//! # Responsibility
//! - Define the synchronous `get`/`set`/`remove` contract the stores write to.
//! - Name the keys of the persisted layout in one place.
//!
//! # Invariants
//! - A successful `set` is visible to the next `get` on the same medium.
//! - Failures are returned to the caller, never swallowed.
//! - No transactional guarantee spans more than one key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Registered local accounts, JSON sequence of `{nome, email, senha}`.
pub const USERS_KEY: &str = "usuarios";
/// Logged-in user's email as plain text.
pub const SESSION_KEY: &str = "logado";
/// Birthday records, JSON sequence of `{id, name, email, password, birthdate}`.
pub const RECORDS_KEY: &str = "aniversariantes";
/// Theme preference as plain text (`light` or `dark`).
pub const THEME_KEY: &str = "theme";

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence medium failure.
#[derive(Debug)]
pub enum StorageError {
    /// Medium cannot be reached at all.
    Unavailable(String),
    /// Write rejected because it would exceed the medium's capacity.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        limit_bytes: usize,
    },
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                limit_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: \
                 {required_bytes} bytes needed, limit is {limit_bytes}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous text key-value medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
