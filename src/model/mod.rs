//! Data model
//!
//! Plain records kept in memory and mirrored to the preference store.

pub mod category;
pub mod suggestions;
pub mod favorites;
pub mod theme;
pub mod stats;

pub use category::{Category, default_categories, parse_hex_color};
pub use suggestions::{SuggestionBook, Draw, AddError, DrawError};
pub use favorites::Favorites;
pub use theme::{ThemeMode, ThemeSettings};
pub use stats::{Stats, CategoryUsage};
