//! Persistence
//!
//! The named preference store and the keys the app keeps in it.

pub mod prefs;
pub mod keys;

pub use prefs::{PrefStore, PrefEditor, PrefValue, StoreError};
