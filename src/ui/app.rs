//! Main UI Application
//!
//! Coordinates rendering and input handling across all screens.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use super::palette::{category_color, Palette};
use crate::model::ThemeMode;
use crate::model::stats::{format_percentage, Stats};
use crate::session::{NoticeKind, Screen, Session};

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

const MAIN_HINTS: &str =
    "[Space] Suggest  [F] Favorite  [C] Category  [M] Manage  [S] Settings  [?] Help  [Q] Quit";

/// Main UI application
pub struct App {
    /// Whether the key help overlay is showing
    show_help: bool,
}

impl App {
    pub fn new() -> Self {
        Self { show_help: false }
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.show_help {
            self.show_help = false;
            return Ok(false);
        }

        match session.state().clone() {
            Screen::Main => self.handle_main_input(key, session),
            Screen::Settings { selected } => self.handle_settings_input(key, session, selected),
            Screen::Statistics => self.handle_statistics_input(key, session),
            Screen::Favorites { selected } => self.handle_favorites_input(key, session, selected),
            Screen::Manage { selected } => self.handle_manage_input(key, session, selected),
            Screen::AddSuggestion { input } => self.handle_add_input(key, session, input),
            Screen::Quit => Ok(true),
        }
    }

    fn handle_main_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                session.draw_suggestion();
            }
            KeyCode::Char('f' | 'F') => {
                session.toggle_favorite();
            }
            KeyCode::Char('c' | 'C') => {
                session.cycle_filter();
            }
            KeyCode::Char('m' | 'M') => {
                session.set_state(Screen::Manage { selected: 0 });
            }
            KeyCode::Char('s' | 'S') => {
                let selected = ThemeMode::ALL
                    .iter()
                    .position(|m| *m == session.theme().mode())
                    .unwrap_or(0);
                session.set_state(Screen::Settings { selected });
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                session.set_state(Screen::Quit);
                return Ok(true);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_settings_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        selected: usize,
    ) -> Result<bool> {
        let last = ThemeMode::ALL.len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = if selected > 0 { selected - 1 } else { last };
                session.set_state(Screen::Settings { selected });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let selected = if selected < last { selected + 1 } else { 0 };
                session.set_state(Screen::Settings { selected });
            }
            KeyCode::Enter => {
                if let Some(mode) = ThemeMode::ALL.get(selected) {
                    session.apply_theme(*mode);
                }
                session.set_state(Screen::Main);
            }
            KeyCode::Char('d' | 'D') => {
                session.toggle_custom_dark();
            }
            KeyCode::Char('t' | 'T') => {
                session.set_state(Screen::Statistics);
            }
            KeyCode::Char('v' | 'V') => {
                session.open_favorites();
            }
            KeyCode::Esc => {
                session.set_state(Screen::Main);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_statistics_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('t' | 'T') => {
                session.set_state(Screen::Main);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_favorites_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        selected: usize,
    ) -> Result<bool> {
        let favorites: Vec<String> = session.favorites().iter().map(String::from).collect();
        if favorites.is_empty() {
            session.set_state(Screen::Main);
            return Ok(false);
        }
        let last = favorites.len() - 1;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = if selected > 0 { selected - 1 } else { last };
                session.set_state(Screen::Favorites { selected });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let selected = if selected < last { selected + 1 } else { 0 };
                session.set_state(Screen::Favorites { selected });
            }
            KeyCode::Enter => {
                let choice = &favorites[selected.min(last)];
                session.show_favorite(choice);
            }
            KeyCode::Esc => {
                session.set_state(Screen::Main);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_manage_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        selected: usize,
    ) -> Result<bool> {
        let len = session.book().len();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    let selected = if selected > 0 { selected - 1 } else { len - 1 };
                    session.set_state(Screen::Manage { selected });
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    let selected = if selected + 1 < len { selected + 1 } else { 0 };
                    session.set_state(Screen::Manage { selected });
                }
            }
            KeyCode::Char('a' | 'A') => {
                session.set_state(Screen::AddSuggestion { input: String::new() });
            }
            KeyCode::Char('d' | 'D') | KeyCode::Delete => {
                if session.remove_suggestion(selected).is_some() {
                    let remaining = session.book().len();
                    let selected = selected.min(remaining.saturating_sub(1));
                    session.set_state(Screen::Manage { selected });
                }
            }
            KeyCode::Char('c' | 'C') => {
                session.cycle_category(selected);
            }
            KeyCode::Esc => {
                session.set_state(Screen::Main);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_add_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        mut input: String,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Enter => {
                if session.add_suggestion(&input).is_ok() {
                    let selected = session.book().len().saturating_sub(1);
                    session.set_state(Screen::Manage { selected });
                }
            }
            KeyCode::Esc => {
                session.set_state(Screen::Manage { selected: 0 });
            }
            KeyCode::Backspace => {
                input.pop();
                session.set_state(Screen::AddSuggestion { input });
            }
            KeyCode::Char(c) => {
                input.push(c);
                session.set_state(Screen::AddSuggestion { input });
            }
            _ => {}
        }
        Ok(false)
    }

    /// Render the current screen
    pub fn render(&self, frame: &mut Frame, session: &Session) {
        let palette = Palette::for_theme(session.theme());

        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg()).fg(palette.fg())),
            frame.area(),
        );

        match session.state() {
            Screen::Main => self.render_main(frame, session, &palette),
            Screen::Settings { selected } => {
                self.render_main(frame, session, &palette);
                self.render_settings(frame, session, &palette, *selected);
            }
            Screen::Statistics => self.render_statistics(frame, session, &palette),
            Screen::Favorites { selected } => {
                self.render_main(frame, session, &palette);
                self.render_favorites(frame, session, &palette, *selected);
            }
            Screen::Manage { selected } => self.render_manage(frame, session, &palette, *selected),
            Screen::AddSuggestion { input } => {
                self.render_manage(frame, session, &palette, 0);
                self.render_add_popup(frame, session, &palette, input);
            }
            Screen::Quit => {}
        }

        if self.show_help {
            self.render_help(frame, &palette);
        }
        self.render_notice(frame, session, &palette);
    }

    fn render_main(&self, frame: &mut Frame, session: &Session, palette: &Palette) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(7),
                Constraint::Length(2),
            ])
            .split(area);

        // Title
        let title = Paragraph::new(Line::from(Span::styled(
            "What should I do next?",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(title, chunks[0]);

        // Category chips
        let active = session.filter_category().map(|c| c.id.as_str());
        let mut chips = vec![chip("All", active.is_none(), palette.accent, palette)];
        for category in session.book().categories() {
            chips.push(Span::raw(" "));
            chips.push(chip(
                &category.label(),
                active == Some(category.id.as_str()),
                category_color(category.color),
                palette,
            ));
        }
        let chips_para = Paragraph::new(Line::from(chips)).alignment(Alignment::Center);
        frame.render_widget(chips_para, chunks[1]);

        // Suggestion card
        let card_area = centered_rect(70, 80, chunks[2]);
        let card = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));
        let card_inner = card.inner(card_area);
        frame.render_widget(card, card_area);

        let reveal = session.reveal();
        let text_style = Style::default()
            .fg(palette.faded(reveal.opacity()))
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from("")];
        match reveal.shown() {
            Some(text) => {
                let emoji = session
                    .current_category()
                    .map(|c| c.emoji.clone())
                    .unwrap_or_else(|| "✨".to_string());
                lines.push(Line::from(Span::raw(emoji)));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(text.to_string(), text_style)));
                lines.push(Line::from(""));

                let count = session.current_count();
                let star = if session.is_current_favorite() {
                    Span::styled("★ favorite", Style::default().fg(palette.favorite))
                } else {
                    Span::styled("☆", Style::default().fg(palette.muted))
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("Chosen {} times  ", count),
                        Style::default().fg(palette.muted),
                    ),
                    star,
                ]));
            }
            None => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Press [Space] for a suggestion!",
                    Style::default().fg(palette.muted),
                )));
            }
        }
        let card_para = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(card_para, card_inner);

        // Key hints
        let hints = Paragraph::new(Line::from(Span::styled(
            MAIN_HINTS,
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[3]);
    }

    fn render_settings(
        &self,
        frame: &mut Frame,
        session: &Session,
        palette: &Palette,
        selected: usize,
    ) {
        let area = centered_rect(50, 60, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" SETTINGS ")
            .style(Style::default().bg(palette.bg()))
            .border_style(Style::default().fg(palette.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let theme = session.theme();
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("Theme", Style::default().fg(palette.muted))),
            Line::from(""),
        ];

        for (i, mode) in ThemeMode::ALL.iter().enumerate() {
            let is_selected = i == selected;
            let radio = if *mode == theme.mode() { "(•)" } else { "( )" };
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg())
            };
            lines.push(Line::from(Span::styled(
                format!("{}{} {}", prefix, radio, mode.name()),
                style,
            )));
        }

        lines.push(Line::from(""));
        let dark_label = if theme.is_dark() { "on" } else { "off" };
        lines.push(Line::from(vec![
            Span::styled("Dark mode: ", Style::default().fg(palette.muted)),
            Span::styled(dark_label, Style::default().fg(palette.fg())),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[T] Statistics  [V] Favorites  [D] Toggle dark (custom)",
            Style::default().fg(palette.fg()),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Apply  [Esc] Cancel",
            Style::default().fg(palette.muted),
        )));

        let menu = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(menu, inner);
    }

    fn render_statistics(&self, frame: &mut Frame, session: &Session, palette: &Palette) {
        let area = frame.area();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" STATISTICS ")
            .border_style(Style::default().fg(palette.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let stats = session.stats();
        let category_rows = stats.category_usage.len() as u16;
        let top_rows = stats.top_suggestions.len() as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if category_rows > 0 { category_rows + 4 } else { 0 }),
                Constraint::Length(if top_rows > 0 { top_rows + 2 } else { 0 }),
                Constraint::Length(5),
                Constraint::Min(1),
            ])
            .split(inner);

        if !stats.category_usage.is_empty() {
            self.render_category_table(frame, &stats, palette, chunks[0]);
        }
        if !stats.top_suggestions.is_empty() {
            self.render_top_suggestions(frame, &stats, palette, chunks[1]);
        }
        self.render_general_stats(frame, &stats, palette, chunks[2]);

        let back = Paragraph::new(Span::styled("[Esc] Back", Style::default().fg(palette.muted)))
            .alignment(Alignment::Center);
        frame.render_widget(back, chunks[3]);
    }

    fn render_category_table(
        &self,
        frame: &mut Frame,
        stats: &Stats,
        palette: &Palette,
        area: Rect,
    ) {
        let header = Row::new(vec![
            Cell::from("Category"),
            Cell::from("Uses"),
            Cell::from("Share"),
        ])
        .style(Style::default().fg(palette.fg()).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = stats
            .category_usage
            .iter()
            .map(|usage| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        format!("{} {}", usage.emoji, usage.name),
                        Style::default().fg(category_color(usage.color)),
                    )),
                    Cell::from(usage.count.to_string()),
                    Cell::from(format_percentage(usage.percentage)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Category Usage ")
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(table, area);
    }

    fn render_top_suggestions(
        &self,
        frame: &mut Frame,
        stats: &Stats,
        palette: &Palette,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Most Chosen ")
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name_width = (inner.width as usize).saturating_sub(14);
        let lines: Vec<Line> = stats
            .top_suggestions
            .iter()
            .map(|(suggestion, count)| {
                let name = truncate_name(suggestion, name_width);
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", name, width = name_width),
                        Style::default().fg(palette.fg()),
                    ),
                    Span::styled(
                        format!("{:>6} times", count),
                        Style::default().fg(palette.highlight),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_general_stats(
        &self,
        frame: &mut Frame,
        stats: &Stats,
        palette: &Palette,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" General ")
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = Style::default().fg(palette.muted);
        let value = Style::default().fg(palette.fg()).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Total draws: ", label),
                Span::styled(stats.total_usage.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Suggestions on the list: ", label),
                Span::styled(stats.suggestion_count.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Last used: ", label),
                Span::styled(stats.last_usage_text(), value),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_favorites(
        &self,
        frame: &mut Frame,
        session: &Session,
        palette: &Palette,
        selected: usize,
    ) {
        let area = centered_rect(50, 60, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" FAVORITES ({}) ", session.favorites().len()))
            .style(Style::default().bg(palette.bg()))
            .border_style(Style::default().fg(palette.favorite));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = (inner.width as usize).saturating_sub(4);
        let mut lines = vec![Line::from("")];
        for (i, favorite) in session.favorites().iter().enumerate() {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(palette.favorite).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg())
            };
            lines.push(Line::from(Span::styled(
                format!("{}★ {}", prefix, truncate_name(favorite, width)),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Show  [Esc] Close",
            Style::default().fg(palette.muted),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_manage(
        &self,
        frame: &mut Frame,
        session: &Session,
        palette: &Palette,
        selected: usize,
    ) {
        let area = frame.area();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" SUGGESTIONS ({}) ", session.book().len()))
            .border_style(Style::default().fg(palette.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let book = session.book();
        let visible = chunks[0].height as usize;
        // Keep the cursor on screen
        let offset = selected.saturating_sub(visible.saturating_sub(1));
        let name_width = (chunks[0].width as usize).saturating_sub(24);

        let lines: Vec<Line> = book
            .suggestions()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, suggestion)| {
                let is_selected = i == selected;
                let prefix = if is_selected { "> " } else { "  " };
                let style = if is_selected {
                    Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg())
                };
                let category = match book.category_for_suggestion(suggestion) {
                    Some(c) => {
                        Span::styled(c.label(), Style::default().fg(category_color(c.color)))
                    }
                    None => Span::styled("-", Style::default().fg(palette.muted)),
                };
                Line::from(vec![
                    Span::styled(
                        format!(
                            "{}{:<width$}",
                            prefix,
                            truncate_name(suggestion, name_width),
                            width = name_width
                        ),
                        style,
                    ),
                    Span::raw("  "),
                    category,
                ])
            })
            .collect();

        if lines.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No suggestions yet. Press [A] to add one.",
                Style::default().fg(palette.muted),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(empty, chunks[0]);
        } else {
            frame.render_widget(Paragraph::new(lines), chunks[0]);
        }

        let hints = Paragraph::new(Span::styled(
            "[A] Add  [D] Delete  [C] Change category  [Esc] Back",
            Style::default().fg(palette.muted),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[1]);
    }

    fn render_add_popup(
        &self,
        frame: &mut Frame,
        session: &Session,
        palette: &Palette,
        input: &str,
    ) {
        let area = centered_rect(60, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" NEW SUGGESTION ")
            .style(Style::default().bg(palette.bg()))
            .border_style(Style::default().fg(palette.highlight));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let category = session
            .filter_category()
            .map(|c| c.label())
            .unwrap_or_else(|| "no category".to_string());

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(palette.highlight)),
                Span::styled(input.to_string(), Style::default().fg(palette.fg())),
                Span::styled("_", Style::default().fg(palette.muted)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("Filed under: {}", category),
                Style::default().fg(palette.muted),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Add  [Esc] Cancel",
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help(&self, frame: &mut Frame, palette: &Palette) {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);

        let key = |k: &'static str| {
            Span::styled(format!("{:<10}", k), Style::default().fg(palette.highlight))
        };
        let desc = |d: &'static str| Span::styled(d, Style::default().fg(palette.fg()));

        let lines = vec![
            Line::from(""),
            Line::from(vec![key("Space"), desc("Suggest something at random")]),
            Line::from(vec![key("F"), desc("Toggle favorite")]),
            Line::from(vec![key("C"), desc("Cycle the category filter")]),
            Line::from(vec![key("M"), desc("Manage the suggestion list")]),
            Line::from(vec![key("S"), desc("Settings, statistics, favorites")]),
            Line::from(vec![key("Q"), desc("Quit")]),
            Line::from(""),
            Line::from(Span::styled("Press any key to close", Style::default().fg(palette.muted))),
        ];

        let para = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" HELP ")
                .style(Style::default().bg(palette.bg()))
                .border_style(Style::default().fg(palette.accent)),
        );
        frame.render_widget(para, area);
    }

    fn render_notice(&self, frame: &mut Frame, session: &Session, palette: &Palette) {
        let Some(notice) = session.notice() else {
            return;
        };
        let area = frame.area();
        if area.height < 3 {
            return;
        }

        let color = match notice.kind {
            NoticeKind::Info => palette.accent,
            NoticeKind::Warning => palette.warning,
            NoticeKind::Error => palette.error,
        };
        let width = (notice.text.chars().count() as u16 + 4).min(area.width);
        let toast = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height - 3,
            width,
            height: 1,
        };
        frame.render_widget(Clear, toast);
        let para = Paragraph::new(Span::styled(
            format!("  {}  ", notice.text),
            Style::default().fg(palette.bg()).bg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(para, toast);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// A filter chip; the active one is drawn inverted
fn chip<'a>(label: &str, active: bool, color: Color, palette: &Palette) -> Span<'a> {
    if active {
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(palette.bg()).bg(color).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(color))
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::{tempdir, TempDir};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn setup() -> (TempDir, App, Session) {
        let dir = tempdir().unwrap();
        let config = Config::with_dir(dir.path());
        let session = Session::open_with_rng(&config, StdRng::seed_from_u64(2));
        (dir, App::new(), session)
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Meditate", 10), "Meditate");
        assert_eq!(truncate_name("Meditate", 5), "Medi…");
        assert_eq!(truncate_name("Meditate", 1), "…");
    }

    #[test]
    fn test_space_draws() {
        let (_dir, mut app, mut session) = setup();
        assert!(!app.handle_input(press(KeyCode::Char(' ')), &mut session).unwrap());
        assert!(session.current().is_some());
        assert_eq!(session.book().total_draws(), 1);
    }

    #[test]
    fn test_settings_apply_theme() {
        let (_dir, mut app, mut session) = setup();
        app.handle_input(press(KeyCode::Char('s')), &mut session).unwrap();
        assert_eq!(session.state(), &Screen::Settings { selected: 0 });

        // System -> Light -> Dark
        app.handle_input(press(KeyCode::Down), &mut session).unwrap();
        app.handle_input(press(KeyCode::Down), &mut session).unwrap();
        app.handle_input(press(KeyCode::Enter), &mut session).unwrap();
        assert_eq!(session.theme().mode(), ThemeMode::Dark);
        assert_eq!(session.state(), &Screen::Main);
    }

    #[test]
    fn test_add_then_delete() {
        let (_dir, mut app, mut session) = setup();
        let before = session.book().len();
        app.handle_input(press(KeyCode::Char('m')), &mut session).unwrap();
        app.handle_input(press(KeyCode::Char('a')), &mut session).unwrap();
        for c in "Bake bread".chars() {
            app.handle_input(press(KeyCode::Char(c)), &mut session).unwrap();
        }
        app.handle_input(press(KeyCode::Enter), &mut session).unwrap();
        assert_eq!(session.book().len(), before + 1);
        assert_eq!(session.state(), &Screen::Manage { selected: before });

        app.handle_input(press(KeyCode::Char('d')), &mut session).unwrap();
        assert_eq!(session.book().len(), before);
        assert!(!session.book().suggestions().iter().any(|s| s == "Bake bread"));
    }

    #[test]
    fn test_uppercase_keys_match_hints() {
        let (_dir, mut app, mut session) = setup();
        app.handle_input(press(KeyCode::Char(' ')), &mut session).unwrap();
        app.handle_input(press(KeyCode::Char('F')), &mut session).unwrap();
        assert!(session.is_current_favorite());

        app.handle_input(press(KeyCode::Char('C')), &mut session).unwrap();
        assert_eq!(session.filter_category().unwrap().name, "Fun");

        app.handle_input(press(KeyCode::Char('M')), &mut session).unwrap();
        assert_eq!(session.state(), &Screen::Manage { selected: 0 });
        app.handle_input(press(KeyCode::Esc), &mut session).unwrap();

        assert!(app.handle_input(press(KeyCode::Char('Q')), &mut session).unwrap());
        assert_eq!(session.state(), &Screen::Quit);
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app, mut session) = setup();
        let ctrl_q = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('q'))
        };
        assert!(app.handle_input(ctrl_q, &mut session).unwrap());
        assert!(app.handle_input(press(KeyCode::Char('q')), &mut session).unwrap());
        assert_eq!(session.state(), &Screen::Quit);
    }

    #[test]
    fn test_every_screen_renders() {
        let (_dir, app, mut session) = setup();
        session.draw_suggestion();
        session.toggle_favorite();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        for screen in [
            Screen::Main,
            Screen::Settings { selected: 1 },
            Screen::Statistics,
            Screen::Favorites { selected: 0 },
            Screen::Manage { selected: 3 },
            Screen::AddSuggestion { input: "Knit".to_string() },
        ] {
            session.set_state(screen);
            terminal.draw(|frame| app.render(frame, &session)).unwrap();
        }
    }

    #[test]
    fn test_statistics_screen_shows_totals() {
        let (_dir, app, mut session) = setup();
        session.draw_suggestion();
        session.set_state(Screen::Statistics);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame, &session)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Total draws: 1"));
        assert!(text.contains("Category Usage"));
    }
}
