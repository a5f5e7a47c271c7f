//! RSVP playback state machine.
//!
//! The engine is cooperative and deadline driven: every timer is a stored
//! deadline, [`PlaybackEngine::next_deadline_ms`] tells the host when to call
//! [`PlaybackEngine::tick`] next, and cancelling a timer clears its deadline
//! so a stale step can never land.

use log::{debug, info};

use crate::{
    content::{Word, WordSequence, empty_sequence},
    input::{InputEvent, InputProvider},
    pacing::word_delay_ms,
    render::{ProgressView, Screen, Theme},
    settings::PersistedSettings,
    text_policy::floor_percent,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
    /// The run reached the end of the text; fires once per run.
    Completed,
}

impl TickResult {
    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Completed, _) | (_, Self::Completed) => Self::Completed,
            (Self::RenderRequested, _) | (_, Self::RenderRequested) => Self::RenderRequested,
            _ => Self::NoRender,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputOutcome {
    Continue,
    ExitRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Complete,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub wpm_step: u16,
    pub dynamic_pacing: bool,
    pub skip_words: usize,
    pub controls_auto_hide_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: 250,
            min_wpm: 100,
            max_wpm: 900,
            wpm_step: 10,
            dynamic_pacing: true,
            skip_words: 10,
            controls_auto_hide_ms: 8_000,
        }
    }
}

/// One cancellable deadline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct TimerSlot {
    deadline_ms: Option<u64>,
}

impl TimerSlot {
    const fn idle() -> Self {
        Self { deadline_ms: None }
    }

    fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Disarms and reports `true` when the deadline has passed.
    fn take_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

pub struct PlaybackEngine {
    config: ReaderConfig,
    theme: Theme,
    words: WordSequence,
    current_index: usize,
    state: PlaybackState,
    is_braking: bool,
    show_controls: bool,
    advance_timer: TimerSlot,
    auto_hide_timer: TimerSlot,
    completion_armed: bool,
    pending_redraw: bool,
    words_since_drain: u32,
}

include!("view.rs");
include!("transport.rs");
include!("runtime.rs");
include!("input.rs");

#[cfg(test)]
mod tests;
