impl PlaybackEngine {
    /// Replaces the word sequence and parks the cursor at `start_index`.
    pub fn load(&mut self, words: WordSequence, start_index: usize) {
        self.advance_timer.cancel();
        self.auto_hide_timer.cancel();

        self.current_index = start_index.min(words.len());
        self.words = words;
        self.state = PlaybackState::Idle;
        self.is_braking = false;
        self.show_controls = true;
        self.completion_armed = true;
        self.pending_redraw = true;

        debug!(
            "transport: load words={} start={}",
            self.words.len(),
            self.current_index
        );
    }

    /// Starts advancing. Returns `false` when already playing or complete.
    pub fn play(&mut self, now_ms: u64) -> bool {
        if self.state != PlaybackState::Idle {
            return false;
        }

        self.state = PlaybackState::Playing;
        self.schedule_current_word(now_ms);
        self.restart_auto_hide(now_ms);
        self.pending_redraw = true;

        debug!(
            "transport: play index={}/{} wpm={}",
            self.current_index,
            self.words.len(),
            self.config.wpm
        );
        true
    }

    /// Stops advancing without moving the cursor.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        self.advance_timer.cancel();
        self.auto_hide_timer.cancel();
        self.state = PlaybackState::Idle;
        self.is_braking = false;
        self.show_controls = true;
        self.pending_redraw = true;

        debug!(
            "transport: pause index={}/{}",
            self.current_index,
            self.words.len()
        );
        true
    }

    pub fn toggle_play_pause(&mut self, now_ms: u64) -> bool {
        if self.is_playing() {
            self.pause()
        } else {
            self.play(now_ms)
        }
    }

    pub fn skip_forward(&mut self, count: usize, now_ms: u64) {
        let target = self.current_index.saturating_add(count);
        self.seek(target, now_ms);
    }

    pub fn skip_backward(&mut self, count: usize, now_ms: u64) {
        let target = self.current_index.saturating_sub(count);
        self.seek(target, now_ms);
    }

    /// Moves the cursor to `index`, clamped to the last word.
    ///
    /// A step scheduled for the old word is cancelled before the cursor
    /// moves and, while playing, a fresh one is scheduled for the new word.
    pub fn seek(&mut self, index: usize, now_ms: u64) {
        if self.words.is_empty() {
            return;
        }

        self.advance_timer.cancel();
        self.current_index = index.min(self.words.len() - 1);

        match self.state {
            PlaybackState::Playing => self.schedule_current_word(now_ms),
            PlaybackState::Complete => {
                self.state = PlaybackState::Idle;
                self.completion_armed = true;
            }
            PlaybackState::Idle => {}
        }
        self.pending_redraw = true;

        debug!(
            "transport: seek index={}/{} state={:?}",
            self.current_index,
            self.words.len(),
            self.state
        );
    }

    /// Back to the first word, stopped, controls visible.
    pub fn restart(&mut self) {
        self.advance_timer.cancel();
        self.auto_hide_timer.cancel();

        self.current_index = 0;
        self.state = PlaybackState::Idle;
        self.is_braking = false;
        self.show_controls = true;
        self.completion_armed = true;
        self.pending_redraw = true;

        debug!("transport: restart words={}", self.words.len());
    }

    /// Half-speed mode for the steps scheduled from now on. Only honoured
    /// while playing.
    pub fn set_braking(&mut self, braking: bool) -> bool {
        let braking = braking && self.is_playing();
        if self.is_braking == braking {
            return false;
        }

        self.is_braking = braking;
        self.pending_redraw = true;
        debug!("transport: braking={}", braking);
        true
    }

    /// Base speed for the steps scheduled from now on. Not clamped here.
    pub fn set_wpm(&mut self, wpm: u16) {
        if self.config.wpm != wpm {
            self.config.wpm = wpm;
            self.pending_redraw = true;
        }
    }

    /// Steps the base speed by the configured increment within
    /// `[min_wpm, max_wpm]`.
    pub fn adjust_wpm(&mut self, increase: bool) -> bool {
        let next = if increase {
            self.config
                .wpm
                .saturating_add(self.config.wpm_step)
                .min(self.config.max_wpm)
        } else {
            self.config
                .wpm
                .saturating_sub(self.config.wpm_step)
                .max(self.config.min_wpm)
        };

        if next != self.config.wpm {
            self.set_wpm(next);
            true
        } else {
            false
        }
    }

    pub fn set_dynamic_pacing(&mut self, enabled: bool) {
        self.config.dynamic_pacing = enabled;
    }

    /// Explicit show: controls visible, auto-hide countdown restarted.
    pub fn show_controls(&mut self, now_ms: u64) {
        if !self.show_controls {
            self.show_controls = true;
            self.pending_redraw = true;
        }
        self.restart_auto_hide(now_ms);
    }

    pub fn toggle_controls(&mut self, now_ms: u64) {
        if self.show_controls {
            self.show_controls = false;
            self.auto_hide_timer.cancel();
            self.pending_redraw = true;
        } else {
            self.show_controls(now_ms);
        }
    }

    fn restart_auto_hide(&mut self, now_ms: u64) {
        self.auto_hide_timer.cancel();
        if self.is_playing() && self.show_controls {
            self.auto_hide_timer
                .arm(now_ms, self.config.controls_auto_hide_ms);
        }
    }
}
