//! Per-user variable usage: favorites and recently used names.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Storage key holding the JSON array of favorite variable names.
pub const FAVORITES_STORAGE_KEY: &str = "variableFavorites";

/// Maximum length of the recently used list.
pub const MAX_RECENT: usize = 5;

/// Set of favorite variable names.
///
/// Iterates in the order names were added so the favorites view is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    names: IndexSet<String>,
}

impl FavoriteSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the stored JSON array of names.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStoredState`] if the text is not a JSON
    /// array of strings.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::InvalidStoredState(e.to_string()))
    }

    /// Encodes the set as a JSON array of names.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A list of strings always serializes.
        serde_json::to_string(&self.names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Flips membership of a name. Returns true if the name is now a favorite.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.shift_remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    /// Returns true if the name is a favorite.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterates names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Removes every favorite.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Most-recent-first list of inserted variable names, without duplicates,
/// capped at [`MAX_RECENT`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentlyUsed {
    names: VecDeque<String>,
}

impl RecentlyUsed {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves or adds a name to the front, evicting the oldest past the cap.
    pub fn record(&mut self, name: &str) {
        self.names.retain(|n| n != name);
        self.names.push_front(name.to_string());
        self.names.truncate(MAX_RECENT);
    }

    /// Returns true if the name was used recently.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterates names, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the names as a vector, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing was used yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
