//! Persisted light/dark theme preference under the `theme` key.

use crate::storage::{KeyValueStore, StorageResult, THEME_KEY};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unsupported theme `{other}`; expected light|dark")),
        }
    }
}

/// Theme preference over a key-value medium.
pub struct ThemePreference<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> ThemePreference<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored theme; absent or unrecognized values fall back to light.
    pub fn load(&self) -> StorageResult<Theme> {
        Ok(self
            .storage
            .get(THEME_KEY)?
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }

    pub fn save(&mut self, theme: Theme) -> StorageResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Flips and persists the theme, returning the new value.
    pub fn toggle(&mut self) -> StorageResult<Theme> {
        let next = self.load()?.toggled();
        self.save(next)?;
        Ok(next)
    }
}
