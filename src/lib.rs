//! Whatnext - a terminal "what should I do next?" picker
//!
//! Keeps a list of activity suggestions, draws one at random,
//! and remembers counts, categories, favorites and the theme.

pub mod config;
pub mod store;
pub mod model;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use model::{Category, Favorites, Stats, SuggestionBook, ThemeMode, ThemeSettings};
pub use session::{Screen, Session};
pub use store::{PrefStore, StoreError};
