impl PlaybackEngine {
    pub fn new(mut config: ReaderConfig) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        config.wpm = config.wpm.clamp(config.min_wpm.max(1), config.max_wpm.max(1));

        Self {
            config,
            theme: Theme::default(),
            words: empty_sequence(),
            current_index: 0,
            state: PlaybackState::Idle,
            is_braking: false,
            show_controls: true,
            advance_timer: TimerSlot::idle(),
            auto_hide_timer: TimerSlot::idle(),
            completion_armed: true,
            pending_redraw: true,
            words_since_drain: 0,
        }
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_braking(&self) -> bool {
        self.is_braking
    }

    pub fn controls_visible(&self) -> bool {
        self.show_controls
    }

    pub fn wpm(&self) -> u16 {
        self.config.wpm
    }

    pub fn dynamic_pacing(&self) -> bool {
        self.config.dynamic_pacing
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.pending_redraw = true;
        }
    }

    /// Settings worth keeping across runs.
    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(self.config.wpm, self.config.dynamic_pacing, self.theme)
    }

    pub fn words(&self) -> &WordSequence {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    /// Word under the cursor; `None` when empty or complete.
    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_index)
    }

    pub fn progress(&self) -> ProgressView {
        ProgressView {
            current_index: self.current_index,
            total_words: self.words.len(),
            percent: floor_percent(self.current_index, self.words.len()),
        }
    }

    /// Earliest pending deadline across both timers.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.advance_timer.deadline_ms, self.auto_hide_timer.deadline_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Words advanced since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let wpm = self.config.wpm;
        let theme = self.theme;

        if self.state == PlaybackState::Complete {
            f(Screen::Complete {
                total_words: self.words.len(),
                wpm,
                theme,
            });
            return;
        }

        match self.current_word() {
            Some(word) => f(Screen::Reading {
                word,
                is_braking: self.is_braking,
                paused: self.state != PlaybackState::Playing,
                show_controls: self.show_controls,
                wpm,
                progress: self.progress(),
                theme,
            }),
            None => f(Screen::Empty { wpm, theme }),
        }
    }
}
