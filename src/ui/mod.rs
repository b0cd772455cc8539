//! User Interface module
//!
//! Terminal UI using ratatui, one render and input handler per screen.

pub mod app;
pub mod palette;

pub use app::App;
pub use palette::Palette;
