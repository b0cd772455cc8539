//! Preference keys

pub const SUGGESTIONS: &str = "suggestions";
pub const COUNTS: &str = "counts";
pub const CATEGORIES: &str = "categories";
pub const SUGGESTION_CATEGORIES: &str = "suggestionCategories";
pub const FAVORITES: &str = "favorites";
pub const THEME: &str = "theme";
pub const CUSTOM_IS_DARK: &str = "customIsDark";
pub const LAST_USAGE: &str = "lastUsage";
