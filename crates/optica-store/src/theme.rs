//! Theme state: the persisted light/dark flag.

use crate::error::StoreError;
use optica_prefs::{keys, LocalStore};
use serde::{Deserialize, Serialize};

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Get the persisted flag value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Holds the active theme and keeps it persisted under the `theme` key.
#[derive(Debug, Default)]
pub struct ThemeState {
    theme: Theme,
}

impl ThemeState {
    /// Load the persisted theme; an absent or unknown flag means light.
    pub fn hydrate(prefs: &LocalStore) -> Result<Self, StoreError> {
        let flag: Option<String> = prefs.get(keys::THEME)?;
        let theme = flag
            .as_deref()
            .and_then(Theme::from_flag)
            .unwrap_or_default();
        Ok(Self { theme })
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether dark mode is active.
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Set and persist the theme.
    pub fn set(&mut self, prefs: &mut LocalStore, theme: Theme) -> Result<(), StoreError> {
        self.theme = theme;
        prefs.set(keys::THEME, &theme.as_str())?;
        Ok(())
    }

    /// Flip and persist the theme, returning the new value.
    pub fn toggle(&mut self, prefs: &mut LocalStore) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.set(prefs, next)?;
        Ok(next)
    }
}
