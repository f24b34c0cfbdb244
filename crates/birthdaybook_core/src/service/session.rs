//! Logged-in session marker and the access gate UI surfaces consult.
//!
//! # Invariants
//! - The `logado` key holds the email of the logged-in account, or is absent.
//! - Record operations never consult this gate; only front ends do.

use crate::service::account_service::{AccountError, AccountService};
use crate::storage::{KeyValueStore, StorageError, SESSION_KEY};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    InvalidCredentials,
    NotLoggedIn,
    Account(AccountError),
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::NotLoggedIn => write!(f, "login required"),
            Self::Account(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Account(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::InvalidCredentials | Self::NotLoggedIn => None,
        }
    }
}

impl From<AccountError> for SessionError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Session gate over a key-value medium.
pub struct SessionGate<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SessionGate<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Checks credentials and records the logged-in email.
    pub fn login<A: KeyValueStore>(
        &mut self,
        accounts: &AccountService<A>,
        email: &str,
        password: &str,
    ) -> SessionResult<String> {
        let Some(account) = accounts.authenticate(email, password)? else {
            warn!("event=session_login module=session status=rejected");
            return Err(SessionError::InvalidCredentials);
        };
        self.storage.set(SESSION_KEY, &account.email)?;
        info!("event=session_login module=session status=ok");
        Ok(account.email)
    }

    /// Clears the session marker; logging out twice is fine.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.storage.remove(SESSION_KEY)?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    /// Logged-in email, if any. A blank stored value counts as logged out.
    pub fn current_user(&self) -> SessionResult<Option<String>> {
        Ok(self
            .storage
            .get(SESSION_KEY)?
            .filter(|email| !email.trim().is_empty()))
    }

    pub fn is_logged_in(&self) -> SessionResult<bool> {
        Ok(self.current_user()?.is_some())
    }

    /// Returns the logged-in email or `NotLoggedIn`.
    pub fn require_user(&self) -> SessionResult<String> {
        self.current_user()?.ok_or(SessionError::NotLoggedIn)
    }
}
