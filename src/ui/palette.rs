//! Color palettes for the light and dark themes

use ratatui::style::Color;

use crate::model::ThemeSettings;
use crate::model::category::argb_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub warning: Color,
    pub error: Color,
    pub favorite: Color,
}

pub const LIGHT: Palette = Palette {
    background: (250, 246, 238),
    text: (20, 20, 24),
    muted: Color::Rgb(120, 118, 112),
    border: Color::Rgb(180, 170, 150),
    accent: Color::Rgb(33, 150, 243),
    highlight: Color::Rgb(230, 120, 20),
    warning: Color::Rgb(200, 120, 0),
    error: Color::Rgb(200, 40, 40),
    favorite: Color::Rgb(220, 170, 0),
};

pub const DARK: Palette = Palette {
    background: (18, 18, 28),
    text: (235, 235, 228),
    muted: Color::Rgb(120, 120, 130),
    border: Color::Rgb(70, 70, 95),
    accent: Color::Rgb(100, 180, 255),
    highlight: Color::Rgb(255, 170, 60),
    warning: Color::Rgb(255, 190, 70),
    error: Color::Rgb(255, 90, 90),
    favorite: Color::Rgb(255, 215, 0),
};

impl Palette {
    pub fn for_theme(theme: &ThemeSettings) -> Self {
        if theme.is_dark() { DARK } else { LIGHT }
    }

    pub fn bg(&self) -> Color {
        let (r, g, b) = self.background;
        Color::Rgb(r, g, b)
    }

    pub fn fg(&self) -> Color {
        let (r, g, b) = self.text;
        Color::Rgb(r, g, b)
    }

    /// Text color blended toward the background; 0.0 is invisible
    pub fn faded(&self, opacity: f32) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        let mix = |bg: u8, fg: u8| (bg as f32 + (fg as f32 - bg as f32) * t).round() as u8;
        Color::Rgb(
            mix(self.background.0, self.text.0),
            mix(self.background.1, self.text.1),
            mix(self.background.2, self.text.2),
        )
    }
}

/// ARGB category color as a terminal color
pub fn category_color(argb: u32) -> Color {
    let (r, g, b) = argb_to_rgb(argb);
    Color::Rgb(r, g, b)
}
