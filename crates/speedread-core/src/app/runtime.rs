impl PlaybackEngine {
    /// Fires whichever timers are due at `now_ms`.
    ///
    /// Hosts call this whenever [`Self::next_deadline_ms`] passes or after
    /// feeding input; calling it early is harmless.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut result = TickResult::NoRender;

        if self.auto_hide_timer.take_due(now_ms) && self.is_playing() && self.show_controls {
            self.show_controls = false;
            result = TickResult::RenderRequested;
        }

        if self.advance_timer.take_due(now_ms) {
            result = result.merge(self.advance_step(now_ms));
        }

        if self.pending_redraw {
            self.pending_redraw = false;
            result = result.merge(TickResult::RenderRequested);
        }

        result
    }

    /// Delay the current word stays on screen under the current speed,
    /// braking and pacing settings, paragraph pause included.
    pub fn step_delay_ms(&self) -> u32 {
        let Some(word) = self.current_word() else {
            return 0;
        };

        let base_wpm = f64::from(self.config.wpm);
        let effective_wpm = if self.is_braking { base_wpm * 0.5 } else { base_wpm };
        let delay = word_delay_ms(word, effective_wpm, self.config.dynamic_pacing);

        if word.is_last_in_paragraph {
            delay.saturating_mul(2)
        } else {
            delay
        }
    }

    fn advance_step(&mut self, now_ms: u64) -> TickResult {
        if !self.is_playing() {
            return TickResult::NoRender;
        }

        if self.current_index >= self.words.len() {
            return self.complete();
        }

        self.current_index += 1;
        self.words_since_drain = self.words_since_drain.saturating_add(1);

        if self.current_index >= self.words.len() {
            return self.complete();
        }

        self.schedule_current_word(now_ms);
        TickResult::RenderRequested
    }

    fn schedule_current_word(&mut self, now_ms: u64) {
        let delay_ms = self.step_delay_ms();
        self.advance_timer.arm(now_ms, u64::from(delay_ms));
    }

    fn complete(&mut self) -> TickResult {
        self.advance_timer.cancel();
        self.auto_hide_timer.cancel();

        self.current_index = self.words.len();
        self.state = PlaybackState::Complete;
        self.is_braking = false;
        self.show_controls = true;
        self.pending_redraw = false;

        if core::mem::replace(&mut self.completion_armed, false) {
            info!("transport: complete words={}", self.words.len());
            TickResult::Completed
        } else {
            TickResult::RenderRequested
        }
    }
}
