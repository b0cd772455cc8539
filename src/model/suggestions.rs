//! Suggestion book
//!
//! The user's suggestion list together with draw counts, category
//! assignments and the time of the last draw.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use super::category::{decode_categories, default_categories, encode_categories, Category};
use crate::store::{keys, PrefStore, StoreError};

/// Reasons a manual add is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
    #[error("suggestion is empty")]
    Blank,
    #[error("\"{0}\" is already on the list")]
    Duplicate(String),
    #[error("no category with id {0}")]
    UnknownCategory(String),
}

/// Reasons a draw cannot happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("the suggestion list is empty")]
    Empty,
    #[error("no suggestions in category {0}")]
    EmptyCategory(String),
}

/// Result of a successful draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub suggestion: String,
    /// Count after this draw
    pub count: u32,
}

/// Default suggestions, keyed by default category name
const DEFAULT_SUGGESTIONS: &[(&str, &str)] = &[
    ("Watch a movie", "Fun"),
    ("Listen to music", "Fun"),
    ("Play a video game", "Fun"),
    ("Solve a puzzle", "Fun"),
    ("Go for a walk", "Health"),
    ("Meditate", "Health"),
    ("Work out", "Health"),
    ("Cook a healthy meal", "Health"),
    ("Read a book", "Productivity"),
    ("Learn a new skill", "Productivity"),
    ("Update your to-do list", "Productivity"),
    ("Tidy up your workspace", "Productivity"),
    ("Call a friend", "Social"),
    ("Spend time with family", "Social"),
    ("Go out", "Social"),
    ("Share something on social media", "Social"),
];

#[derive(Debug, Clone, Default)]
pub struct SuggestionBook {
    /// Insertion order is display order
    suggestions: Vec<String>,
    counts: BTreeMap<String, u32>,
    categories: Vec<Category>,
    /// suggestion -> category id
    suggestion_categories: HashMap<String, String>,
    /// Epoch millis of the last draw, 0 = never
    last_usage: i64,
}

impl SuggestionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load everything from the store.
    ///
    /// Malformed entries are logged and treated as missing. Default
    /// categories are seeded when none load; default suggestions are seeded
    /// only when the store has never held a suggestion list.
    pub fn load(store: &PrefStore) -> Self {
        let first_run = !store.contains(keys::SUGGESTIONS);

        let mut book = Self {
            suggestions: decode_or_warn(store, keys::SUGGESTIONS, decode_suggestion_list),
            counts: decode_or_warn(store, keys::COUNTS, decode_counts),
            categories: decode_or_warn(store, keys::CATEGORIES, decode_categories),
            suggestion_categories: decode_or_warn(
                store,
                keys::SUGGESTION_CATEGORIES,
                decode_suggestion_categories,
            ),
            last_usage: store.get_long(keys::LAST_USAGE, 0),
        };

        if book.categories.is_empty() {
            book.categories = default_categories();
        }
        if first_run {
            log::info!("First run, seeding default suggestions");
            book.add_default_suggestions();
        }

        log::info!(
            "Loaded {} suggestions in {} categories",
            book.suggestions.len(),
            book.categories.len()
        );
        book
    }

    /// Write list, counts, categories, mapping and last usage
    pub fn save(&self, store: &mut PrefStore) -> Result<(), StoreError> {
        store
            .edit()
            .put_string(keys::SUGGESTIONS, encode_suggestion_list(&self.suggestions)?)
            .put_string(keys::COUNTS, serde_json::to_string(&self.counts)?)
            .put_string(keys::CATEGORIES, encode_categories(&self.categories)?)
            .put_string(
                keys::SUGGESTION_CATEGORIES,
                serde_json::to_string(&self.suggestion_categories)?,
            )
            .put_long(keys::LAST_USAGE, self.last_usage)
            .apply()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Manually add a suggestion, optionally filed under a category
    pub fn add_suggestion(
        &mut self,
        text: &str,
        category_id: Option<&str>,
    ) -> Result<(), AddError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AddError::Blank);
        }
        if self.suggestions.iter().any(|s| s == text) {
            return Err(AddError::Duplicate(text.to_string()));
        }
        if let Some(id) = category_id {
            if self.category(id).is_none() {
                return Err(AddError::UnknownCategory(id.to_string()));
            }
        }

        self.suggestions.push(text.to_string());
        if let Some(id) = category_id {
            self.suggestion_categories.insert(text.to_string(), id.to_string());
        }
        log::debug!("Added suggestion {:?}", text);
        Ok(())
    }

    /// Remove the suggestion at `index`.
    ///
    /// The draw count is kept for statistics.
    pub fn remove_suggestion(&mut self, index: usize) -> Option<String> {
        if index >= self.suggestions.len() {
            return None;
        }
        let removed = self.suggestions.remove(index);
        if !self.suggestions.contains(&removed) {
            self.suggestion_categories.remove(&removed);
        }
        log::debug!("Removed suggestion {:?}", removed);
        Some(removed)
    }

    /// Suggestions filed under `category_id`, or all of them for `None`
    pub fn suggestions_in(&self, category_id: Option<&str>) -> Vec<&str> {
        self.suggestions
            .iter()
            .filter(|s| match category_id {
                Some(id) => {
                    self.suggestion_categories.get(s.as_str()).map(String::as_str) == Some(id)
                }
                None => true,
            })
            .map(String::as_str)
            .collect()
    }

    /// Pick a suggestion uniformly at random and count it
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        category_id: Option<&str>,
        now_millis: i64,
    ) -> Result<Draw, DrawError> {
        if self.suggestions.is_empty() {
            return Err(DrawError::Empty);
        }

        let suggestion = self
            .suggestions_in(category_id)
            .choose(rng)
            .map(|s| s.to_string())
            .ok_or_else(|| DrawError::EmptyCategory(category_id.unwrap_or_default().to_string()))?;

        let count = self.counts.entry(suggestion.clone()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;
        self.last_usage = now_millis;

        log::info!("Drew {:?} (count {})", suggestion, count);
        Ok(Draw { suggestion, count })
    }

    pub fn count_for(&self, suggestion: &str) -> u32 {
        self.counts.get(suggestion).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn total_draws(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Epoch millis of the last draw, 0 when never drawn
    pub fn last_usage(&self) -> i64 {
        self.last_usage
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn category_for_suggestion(&self, suggestion: &str) -> Option<&Category> {
        let id = self.suggestion_categories.get(suggestion)?;
        self.category(id)
    }

    pub fn set_suggestion_category(&mut self, suggestion: &str, category_id: &str) {
        self.suggestion_categories
            .insert(suggestion.to_string(), category_id.to_string());
    }

    pub fn clear_suggestion_category(&mut self, suggestion: &str) {
        self.suggestion_categories.remove(suggestion);
    }

    /// Append the built-in suggestions, filed under the default categories
    /// that are present by name
    pub fn add_default_suggestions(&mut self) {
        for (suggestion, category_name) in DEFAULT_SUGGESTIONS {
            self.suggestions.push(suggestion.to_string());
            if let Some(category) = self.categories.iter().find(|c| c.name == *category_name) {
                self.suggestion_categories
                    .insert(suggestion.to_string(), category.id.clone());
            }
        }
    }
}

/// Decode the value under `key`, falling back to empty on absence or error
fn decode_or_warn<T, F>(store: &PrefStore, key: &str, decode: F) -> T
where
    T: Default,
    F: FnOnce(&str) -> Result<T, serde_json::Error>,
{
    match store.get_string(key) {
        Some(json) => decode(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {:?}: {}", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

/// The list is stored wrapped in an object: `{"suggestions": [...]}`
#[derive(Serialize, Deserialize)]
struct SuggestionDocument<T> {
    suggestions: T,
}

pub fn encode_suggestion_list(suggestions: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SuggestionDocument { suggestions })
}

/// Decode the suggestion document, skipping non-string entries
pub fn decode_suggestion_list(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let doc: SuggestionDocument<Vec<Value>> = serde_json::from_str(json)?;
    Ok(doc
        .suggestions
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Decode `{"<suggestion>": <count>}`, skipping non-integer counts
pub fn decode_counts(json: &str) -> Result<BTreeMap<String, u32>, serde_json::Error> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| v.as_u64().map(|n| (k, n.min(u32::MAX as u64) as u32)))
        .collect())
}

/// Decode `{"<suggestion>": "<category id>"}`, skipping non-string ids
pub fn decode_suggestion_categories(
    json: &str,
) -> Result<HashMap<String, String>, serde_json::Error> {
    let raw: HashMap<String, Value> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(id) => Some((k, id)),
            _ => None,
        })
        .collect())
}
