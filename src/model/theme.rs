//! Theme preference
//!
//! `system` follows the clock (dark from 18:00), `light`/`dark` are fixed,
//! and `custom` uses a user-set dark flag.

use serde::{Deserialize, Serialize};

use crate::store::{keys, PrefStore, StoreError};

/// Hour of day from which system mode goes dark
pub const EVENING_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
    Custom,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 4] = [
        ThemeMode::System,
        ThemeMode::Light,
        ThemeMode::Dark,
        ThemeMode::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Custom => "custom",
        }
    }

    /// Parse a stored name; anything unknown is `System`
    pub fn parse(name: &str) -> Self {
        match name {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            "custom" => ThemeMode::Custom,
            _ => ThemeMode::System,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::System => "System (follow the clock)",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeSettings {
    mode: ThemeMode,
    dark: bool,
}

impl ThemeSettings {
    /// Load the stored theme, resolving `system` against `hour` (0-23)
    pub fn load(store: &PrefStore, hour: u32) -> Self {
        let mode = ThemeMode::parse(&store.get_string_or(keys::THEME, ThemeMode::System.as_str()));
        let dark = match mode {
            ThemeMode::System => hour >= EVENING_HOUR,
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::Custom => store.get_bool(keys::CUSTOM_IS_DARK, false),
        };
        log::debug!("Theme {} (dark: {})", mode.as_str(), dark);
        Self { mode, dark }
    }

    /// Store the mode name and the current dark flag
    pub fn save(&self, store: &mut PrefStore) -> Result<(), StoreError> {
        store
            .edit()
            .put_string(keys::THEME, self.mode.as_str())
            .put_bool(keys::CUSTOM_IS_DARK, self.dark)
            .apply()
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Switch mode. Custom keeps whatever dark flag is current.
    pub fn set_theme(&mut self, mode: ThemeMode, hour: u32) {
        self.mode = mode;
        match mode {
            ThemeMode::System => self.dark = hour >= EVENING_HOUR,
            ThemeMode::Light => self.dark = false,
            ThemeMode::Dark => self.dark = true,
            ThemeMode::Custom => {}
        }
    }

    /// Set the dark flag; only honored in custom mode
    pub fn set_custom_dark(&mut self, dark: bool) -> bool {
        if self.mode == ThemeMode::Custom {
            self.dark = dark;
            true
        } else {
            false
        }
    }
}
