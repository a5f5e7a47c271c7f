//! App-level view models consumed by platform renderers.

use crate::{content::Word, session::ResumeOffer};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProgressView {
    pub current_index: usize,
    pub total_words: usize,
    /// 0..=100
    pub percent: u8,
}

/// View model handed to the renderer.
pub enum Screen<'a> {
    /// No text loaded.
    Empty { wpm: u16, theme: Theme },
    Reading {
        word: &'a Word,
        is_braking: bool,
        paused: bool,
        show_controls: bool,
        wpm: u16,
        progress: ProgressView,
        theme: Theme,
    },
    Complete {
        total_words: usize,
        wpm: u16,
        theme: Theme,
    },
    ResumePrompt {
        offer: ResumeOffer,
        preview: &'a str,
        theme: Theme,
    },
}
