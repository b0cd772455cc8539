//! Session state machine
//!
//! Owns every record for the lifetime of the process, routes mutations
//! to the store, and tracks which screen is showing.

use chrono::{Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use super::reveal::Reveal;
use crate::config::Config;
use crate::model::{
    AddError, Category, Draw, DrawError, Favorites, Stats, SuggestionBook, ThemeMode,
    ThemeSettings,
};
use crate::store::{PrefStore, StoreError};

/// How long a notice stays on screen, in seconds
const NOTICE_SECONDS: f32 = 2.5;

/// All possible screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The suggestion card
    Main,
    /// Theme choice plus links to statistics and favorites
    Settings { selected: usize },
    /// Usage statistics
    Statistics,
    /// Favorite picker
    Favorites { selected: usize },
    /// Suggestion list with delete and category assignment
    Manage { selected: usize },
    /// Typing a new suggestion
    AddSuggestion { input: String },
    /// Exit the app
    Quit,
}

/// A short-lived message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

pub struct Session {
    state: Screen,
    store: PrefStore,
    book: SuggestionBook,
    favorites: Favorites,
    theme: ThemeSettings,
    rng: StdRng,
    /// Suggestion on the main card
    current: Option<String>,
    /// Category id the draw is restricted to
    filter: Option<String>,
    notice: Option<Notice>,
    reveal: Reveal,
}

impl Session {
    /// Load every record from the configured store
    pub fn open(config: &Config) -> Self {
        Self::open_with_rng(config, StdRng::from_entropy())
    }

    pub fn open_with_rng(config: &Config, rng: StdRng) -> Self {
        let store = PrefStore::open(&config.data_dir, &config.store_name);
        let book = SuggestionBook::load(&store);
        let favorites = Favorites::load(&store);
        let theme = ThemeSettings::load(&store, current_hour());

        Self {
            state: Screen::Main,
            store,
            book,
            favorites,
            theme,
            rng,
            current: None,
            filter: None,
            notice: None,
            reveal: Reveal::new(),
        }
    }

    /// Get the current screen
    pub fn state(&self) -> &Screen {
        &self.state
    }

    /// Set a new screen
    pub fn set_state(&mut self, state: Screen) {
        log::debug!("Screen transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn book(&self) -> &SuggestionBook {
        &self.book
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    pub fn store(&self) -> &PrefStore {
        &self.store
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.current
            .as_deref()
            .and_then(|s| self.book.category_for_suggestion(s))
    }

    pub fn current_count(&self) -> u32 {
        self.current
            .as_deref()
            .map(|s| self.book.count_for(s))
            .unwrap_or(0)
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current
            .as_deref()
            .map(|s| self.favorites.contains(s))
            .unwrap_or(false)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Show a notice, replacing any previous one
    pub fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) {
        let text = text.into();
        log::debug!("Notice: {}", text);
        self.notice = Some(Notice {
            text,
            kind,
            remaining: NOTICE_SECONDS,
        });
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.book)
    }

    /// Advance animations and notice timers (called every frame)
    pub fn update(&mut self, delta: Duration) {
        self.reveal.update(delta);

        if let Some(notice) = &mut self.notice {
            notice.remaining -= delta.as_secs_f32();
            if notice.remaining <= 0.0 {
                self.notice = None;
            }
        }
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Draw a random suggestion (respecting the category filter) and save.
    pub fn draw_suggestion(&mut self) -> Option<Draw> {
        let now = Utc::now().timestamp_millis();
        match self.book.draw(&mut self.rng, self.filter.as_deref(), now) {
            Ok(draw) => {
                self.current = Some(draw.suggestion.clone());
                self.reveal.start(draw.suggestion.clone());
                self.save_book();
                Some(draw)
            }
            Err(DrawError::Empty) => {
                self.notify("The list is empty. Add some suggestions first!", NoticeKind::Warning);
                None
            }
            Err(DrawError::EmptyCategory(_)) => {
                let label = self
                    .filter_category()
                    .map(|c| c.label())
                    .unwrap_or_default();
                self.notify(format!("No suggestions in {}", label), NoticeKind::Warning);
                None
            }
        }
    }

    /// Category the draw is currently restricted to
    pub fn filter_category(&self) -> Option<&Category> {
        self.filter.as_deref().and_then(|id| self.book.category(id))
    }

    /// All -> first category -> ... -> last category -> All
    pub fn cycle_filter(&mut self) {
        let categories = self.book.categories();
        let next = match &self.filter {
            None => categories.first(),
            Some(id) => categories
                .iter()
                .position(|c| &c.id == id)
                .and_then(|i| categories.get(i + 1)),
        };
        self.filter = next.map(|c| c.id.clone());
        log::debug!("Filter set to {:?}", self.filter);
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Toggle the suggestion on the card. Returns the new membership.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let Some(current) = self.current.clone() else {
            self.notify("Draw a suggestion first", NoticeKind::Info);
            return None;
        };

        let now_favorite = self.favorites.toggle(&current);
        if let Err(e) = self.favorites.save(&mut self.store) {
            self.report_save_error(e);
        }
        if now_favorite {
            self.notify("Added to favorites", NoticeKind::Info);
        } else {
            self.notify("Removed from favorites", NoticeKind::Info);
        }
        Some(now_favorite)
    }

    /// Open the favorite picker, or explain why not
    pub fn open_favorites(&mut self) {
        if self.favorites.is_empty() {
            self.notify("No favorite suggestions yet!", NoticeKind::Info);
            self.set_state(Screen::Main);
        } else {
            self.set_state(Screen::Favorites { selected: 0 });
        }
    }

    /// Put a favorite on the card without counting a draw
    pub fn show_favorite(&mut self, suggestion: &str) {
        self.current = Some(suggestion.to_string());
        self.reveal.start(suggestion);
        self.set_state(Screen::Main);
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn apply_theme(&mut self, mode: ThemeMode) {
        if mode == self.theme.mode() {
            return;
        }
        self.theme.set_theme(mode, current_hour());
        log::info!("Theme set to {}", mode.as_str());
        self.save_theme();
    }

    pub fn toggle_custom_dark(&mut self) {
        let dark = !self.theme.is_dark();
        if self.theme.set_custom_dark(dark) {
            self.save_theme();
        } else {
            self.notify("Dark toggle only applies to the Custom theme", NoticeKind::Info);
        }
    }

    // ========================================================================
    // List management
    // ========================================================================

    /// Add a suggestion, filed under the active filter category
    pub fn add_suggestion(&mut self, text: &str) -> Result<(), AddError> {
        let category = self.filter.clone();
        match self.book.add_suggestion(text, category.as_deref()) {
            Ok(()) => {
                self.save_book();
                self.notify(format!("Added \"{}\"", text.trim()), NoticeKind::Info);
                Ok(())
            }
            Err(e) => {
                self.notify(capitalize(&e.to_string()), NoticeKind::Warning);
                Err(e)
            }
        }
    }

    pub fn remove_suggestion(&mut self, index: usize) -> Option<String> {
        let removed = self.book.remove_suggestion(index)?;
        self.save_book();
        self.notify(format!("Removed \"{}\"", removed), NoticeKind::Info);
        Some(removed)
    }

    /// Move the suggestion at `index` to the next category (none after the last)
    pub fn cycle_category(&mut self, index: usize) {
        let Some(suggestion) = self.book.suggestions().get(index).cloned() else {
            return;
        };
        let categories = self.book.categories();
        let next = match self.book.category_for_suggestion(&suggestion) {
            None => categories.first(),
            Some(current) => categories
                .iter()
                .position(|c| c.id == current.id)
                .and_then(|i| categories.get(i + 1)),
        }
        .map(|c| c.id.clone());

        match next {
            Some(id) => self.book.set_suggestion_category(&suggestion, &id),
            None => self.book.clear_suggestion_category(&suggestion),
        }
        self.save_book();
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn save_book(&mut self) {
        if let Err(e) = self.book.save(&mut self.store) {
            self.report_save_error(e);
        }
    }

    fn save_theme(&mut self) {
        if let Err(e) = self.theme.save(&mut self.store) {
            self.report_save_error(e);
        }
    }

    fn report_save_error(&mut self, e: StoreError) {
        log::error!("Failed to save preferences: {}", e);
        self.notify(format!("Failed to save: {}", e), NoticeKind::Error);
    }
}

fn current_hour() -> u32 {
    Local::now().hour()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn session() -> (TempDir, Session) {
        let dir = tempdir().unwrap();
        let config = Config::with_dir(dir.path());
        let session = Session::open_with_rng(&config, StdRng::seed_from_u64(1));
        (dir, session)
    }

    #[test]
    fn test_draw_sets_current_and_persists() {
        let (dir, mut session) = session();
        let draw = session.draw_suggestion().unwrap();
        assert_eq!(session.current(), Some(draw.suggestion.as_str()));
        assert_eq!(session.current_count(), 1);

        let reopened = Session::open(&Config::with_dir(dir.path()));
        assert_eq!(reopened.book().count_for(&draw.suggestion), 1);
        assert!(reopened.book().last_usage() > 0);
    }

    #[test]
    fn test_draw_on_empty_list_notifies() {
        let (_dir, mut session) = session();
        while session.remove_suggestion(0).is_some() {}
        assert!(session.draw_suggestion().is_none());
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Warning);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_filter_cycles_through_categories() {
        let (_dir, mut session) = session();
        assert!(session.filter_category().is_none());
        let names: Vec<String> = (0..4)
            .map(|_| {
                session.cycle_filter();
                session.filter_category().unwrap().name.clone()
            })
            .collect();
        assert_eq!(names, ["Fun", "Health", "Productivity", "Social"]);
        session.cycle_filter();
        assert!(session.filter_category().is_none());
    }

    #[test]
    fn test_filtered_draw_stays_in_category() {
        let (_dir, mut session) = session();
        session.cycle_filter();
        for _ in 0..10 {
            session.draw_suggestion().unwrap();
            assert_eq!(session.current_category().unwrap().name, "Fun");
        }
    }

    #[test]
    fn test_favorite_requires_current() {
        let (dir, mut session) = session();
        assert_eq!(session.toggle_favorite(), None);

        session.draw_suggestion().unwrap();
        assert_eq!(session.toggle_favorite(), Some(true));
        assert!(session.is_current_favorite());

        let reopened = Session::open(&Config::with_dir(dir.path()));
        assert_eq!(reopened.favorites().len(), 1);
    }

    #[test]
    fn test_favorite_survives_removal() {
        let (dir, mut session) = session();
        let drawn = session.draw_suggestion().unwrap().suggestion;
        session.toggle_favorite();

        let index = session
            .book()
            .suggestions()
            .iter()
            .position(|s| *s == drawn)
            .unwrap();
        assert_eq!(session.remove_suggestion(index), Some(drawn.clone()));
        assert!(session.favorites().contains(&drawn));

        let reopened = Session::open(&Config::with_dir(dir.path()));
        assert!(!reopened.book().suggestions().contains(&drawn));
        assert!(reopened.favorites().contains(&drawn));
    }

    #[test]
    fn test_empty_favorites_stay_on_main() {
        let (_dir, mut session) = session();
        session.open_favorites();
        assert_eq!(session.state(), &Screen::Main);
        assert!(session.notice().is_some());
    }

    #[test]
    fn test_show_favorite_does_not_count() {
        let (_dir, mut session) = session();
        session.show_favorite("Read a book");
        assert_eq!(session.current(), Some("Read a book"));
        assert_eq!(session.current_count(), 0);
    }

    #[test]
    fn test_theme_persists() {
        let (dir, mut session) = session();
        session.apply_theme(ThemeMode::Dark);
        assert!(session.theme().is_dark());

        let reopened = Session::open(&Config::with_dir(dir.path()));
        assert_eq!(reopened.theme().mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_add_uses_filter_category() {
        let (_dir, mut session) = session();
        session.cycle_filter();
        session.cycle_filter();
        session.add_suggestion("Stretch").unwrap();
        let category = session.book().category_for_suggestion("Stretch").unwrap();
        assert_eq!(category.name, "Health");

        assert_eq!(
            session.add_suggestion("Stretch"),
            Err(AddError::Duplicate("Stretch".to_string()))
        );
    }

    #[test]
    fn test_cycle_category_wraps_to_none() {
        let (_dir, mut session) = session();
        session.add_suggestion("Juggle").unwrap();
        let index = session.book().len() - 1;
        for expected in ["Fun", "Health", "Productivity", "Social"] {
            session.cycle_category(index);
            assert_eq!(session.book().category_for_suggestion("Juggle").unwrap().name, expected);
        }
        session.cycle_category(index);
        assert!(session.book().category_for_suggestion("Juggle").is_none());
    }

    #[test]
    fn test_notice_expires() {
        let (_dir, mut session) = session();
        session.notify("hello", NoticeKind::Info);
        session.update(Duration::from_secs(1));
        assert!(session.notice().is_some());
        session.update(Duration::from_secs(2));
        assert!(session.notice().is_none());
    }
}
