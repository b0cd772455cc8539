//! Suggestion categories
//!
//! Categories carry a display name, an ARGB color and an emoji glyph.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A category suggestions can be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Generated identifier (UUID v4 string)
    pub id: String,
    pub name: String,
    /// 32-bit ARGB color
    #[serde(deserialize_with = "de_color")]
    pub color: u32,
    pub emoji: String,
}

impl Category {
    /// Create a category with a fresh id
    pub fn new(name: impl Into<String>, color: u32, emoji: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color,
            emoji: emoji.into(),
        }
    }

    /// RGB components of the color (alpha dropped)
    pub fn rgb(&self) -> (u8, u8, u8) {
        argb_to_rgb(self.color)
    }

    /// "emoji name", as shown on filter chips
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Colors may be stored as signed 32-bit integers; keep the bit pattern
fn de_color<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let n = i64::deserialize(deserializer)?;
    Ok(n as u32)
}

/// Split an ARGB value into RGB components
pub fn argb_to_rgb(argb: u32) -> (u8, u8, u8) {
    (
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
    )
}

/// Parse `#RRGGBB` or `#AARRGGBB` into an ARGB value (opaque when no alpha)
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#')?;
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(0xFF00_0000 | value),
        8 => Some(value),
        _ => None,
    }
}

/// The four categories seeded on first run
pub fn default_categories() -> Vec<Category> {
    [
        ("Fun", "#FF5252", "🎭"),
        ("Health", "#4CAF50", "💪"),
        ("Productivity", "#2196F3", "📝"),
        ("Social", "#FF9800", "👥"),
    ]
    .into_iter()
    .map(|(name, hex, emoji)| {
        Category::new(name, parse_hex_color(hex).unwrap_or(0xFF80_8080), emoji)
    })
    .collect()
}

/// Encode categories as a JSON array of `{id, name, color, emoji}` objects
pub fn encode_categories(categories: &[Category]) -> Result<String, serde_json::Error> {
    serde_json::to_string(categories)
}

/// Decode a JSON array of categories.
///
/// Entries that are not valid category objects are skipped; a document that
/// is not an array is an error.
pub fn decode_categories(json: &str) -> Result<Vec<Category>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Category>(entry) {
            Ok(category) => Some(category),
            Err(e) => {
                log::warn!("Skipping malformed category: {}", e);
                None
            }
        })
        .collect())
}
