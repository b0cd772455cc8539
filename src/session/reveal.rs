//! Suggestion reveal animation
//!
//! Fades the old text out, swaps in the new one, then fades it in.
//! Driven by frame deltas from the main loop.

use std::time::Duration;

/// Fade-out length in seconds
pub const FADE_OUT: f32 = 0.2;
/// Fade-in length in seconds
pub const FADE_IN: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    FadeOut,
    FadeIn,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    phase: RevealPhase,
    /// Time spent in the current phase
    phase_time: f32,
    /// Text currently on screen
    shown: Option<String>,
    /// Text waiting for the fade-out to finish
    pending: Option<String>,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            phase: RevealPhase::Idle,
            phase_time: 0.0,
            shown: None,
            pending: None,
        }
    }

    /// Begin revealing `text`. Nothing on screen yet means straight to fade-in.
    pub fn start(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.shown.is_none() {
            self.shown = Some(text);
            self.pending = None;
            self.phase = RevealPhase::FadeIn;
        } else {
            self.pending = Some(text);
            self.phase = RevealPhase::FadeOut;
        }
        self.phase_time = 0.0;
    }

    pub fn update(&mut self, delta: Duration) {
        let delta_secs = delta.as_secs_f32();
        match self.phase {
            RevealPhase::Idle => {}
            RevealPhase::FadeOut => {
                self.phase_time += delta_secs;
                if self.phase_time >= FADE_OUT {
                    // Text switches at the end of the fade-out
                    let overflow = self.phase_time - FADE_OUT;
                    if let Some(text) = self.pending.take() {
                        self.shown = Some(text);
                    }
                    self.phase = RevealPhase::FadeIn;
                    self.phase_time = overflow;
                    self.finish_fade_in_if_done();
                }
            }
            RevealPhase::FadeIn => {
                self.phase_time += delta_secs;
                self.finish_fade_in_if_done();
            }
        }
    }

    fn finish_fade_in_if_done(&mut self) {
        if self.phase_time >= FADE_IN {
            self.phase = RevealPhase::Idle;
            self.phase_time = 0.0;
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// Visibility of the shown text, 0.0 (hidden) to 1.0
    pub fn opacity(&self) -> f32 {
        match self.phase {
            RevealPhase::Idle => 1.0,
            RevealPhase::FadeOut => (1.0 - self.phase_time / FADE_OUT).clamp(0.0, 1.0),
            RevealPhase::FadeIn => (self.phase_time / FADE_IN).clamp(0.0, 1.0),
        }
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}
