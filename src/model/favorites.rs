//! Favorite suggestions
//!
//! Independent of the suggestion list: removing a suggestion leaves it here.

use std::collections::BTreeSet;

use crate::store::{keys, PrefStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    items: BTreeSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &PrefStore) -> Self {
        let items = store.get_string_set(keys::FAVORITES).unwrap_or_default();
        log::debug!("Loaded {} favorites", items.len());
        Self { items }
    }

    pub fn save(&self, store: &mut PrefStore) -> Result<(), StoreError> {
        store
            .edit()
            .put_string_set(keys::FAVORITES, self.items.iter().cloned())
            .apply()
    }

    pub fn contains(&self, suggestion: &str) -> bool {
        self.items.contains(suggestion)
    }

    /// Flip membership of `suggestion`, returning whether it is now a favorite.
    /// Blank text is never added.
    pub fn toggle(&mut self, suggestion: &str) -> bool {
        if suggestion.trim().is_empty() {
            return false;
        }
        if self.items.remove(suggestion) {
            false
        } else {
            self.items.insert(suggestion.to_string());
            true
        }
    }

    /// Favorites in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
