//! Local account registration and credential checks.
//!
//! # Responsibility
//! - Own the `usuarios` key.
//! - Register accounts with unique emails and authenticate credentials.
//!
//! # Invariants
//! - Emails are unique across registered accounts (exact match).
//! - Name, email and password are trimmed and required.
//! - Credentials are never logged.

use crate::model::account::UserAccount;
use crate::storage::{KeyValueStore, StorageError, USERS_KEY};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug)]
pub enum AccountError {
    /// Required registration field is blank.
    MissingField(&'static str),
    InvalidEmail(String),
    EmailTaken(String),
    Storage(StorageError),
    InvalidData(String),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(email) => write!(f, "`{email}` is not a valid email address"),
            Self::EmailTaken(email) => write!(f, "email already registered: {email}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted accounts: {message}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AccountError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Account registry over a key-value medium.
pub struct AccountService<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> AccountService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// - `MissingField` / `InvalidEmail` for bad input.
    /// - `EmailTaken` when the email is already registered.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<UserAccount> {
        let name = required(name, "name")?;
        let email = required(email, "email")?;
        let password = required(password, "password")?;
        if !EMAIL_SHAPE_RE.is_match(&email) {
            return Err(AccountError::InvalidEmail(email));
        }

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|account| account.email == email) {
            warn!("event=account_register module=account status=rejected reason=email_taken");
            return Err(AccountError::EmailTaken(email));
        }

        let account = UserAccount::new(name, email, password);
        accounts.push(account.clone());
        let encoded = serde_json::to_string(&accounts).map_err(|err| {
            AccountError::InvalidData(format!("failed to encode accounts: {err}"))
        })?;
        self.storage.set(USERS_KEY, &encoded)?;

        info!(
            "event=account_register module=account status=ok account_count={}",
            accounts.len()
        );
        Ok(account)
    }

    /// Returns the account matching both email and password exactly.
    ///
    /// Input is trimmed the same way registration trims it.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AccountResult<Option<UserAccount>> {
        let email = email.trim();
        let password = password.trim();
        Ok(self
            .accounts()?
            .into_iter()
            .find(|account| account.matches_credentials(email, password)))
    }

    /// All registered accounts in registration order.
    pub fn accounts(&self) -> AccountResult<Vec<UserAccount>> {
        let Some(raw) = self.storage.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Option<Vec<UserAccount>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|err| AccountError::InvalidData(format!("`{USERS_KEY}` is not valid: {err}")))
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn required(value: &str, field: &'static str) -> AccountResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
