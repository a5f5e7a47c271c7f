impl PlaybackEngine {
    /// Drains `input` and applies every pending event.
    ///
    /// Provider errors end the drain for this round; the engine keeps going.
    pub fn process_inputs<IN>(&mut self, input: &mut IN, now_ms: u64) -> InputOutcome
    where
        IN: InputProvider,
    {
        loop {
            match input.poll_event() {
                Ok(Some(event)) => {
                    if self.apply_input(event, now_ms) == InputOutcome::ExitRequested {
                        return InputOutcome::ExitRequested;
                    }
                }
                Ok(None) => return InputOutcome::Continue,
                Err(_) => {
                    debug!("input: provider error, skipping this round");
                    return InputOutcome::Continue;
                }
            }
        }
    }

    pub fn apply_input(&mut self, event: InputEvent, now_ms: u64) -> InputOutcome {
        match event {
            InputEvent::TogglePlayPause => {
                self.toggle_play_pause(now_ms);
            }
            InputEvent::SkipForward => self.skip_forward(self.config.skip_words, now_ms),
            InputEvent::SkipBackward => self.skip_backward(self.config.skip_words, now_ms),
            InputEvent::SpeedUp => {
                self.adjust_wpm(true);
            }
            InputEvent::SlowDown => {
                self.adjust_wpm(false);
            }
            InputEvent::ToggleBrake => {
                self.set_braking(!self.is_braking);
            }
            InputEvent::Restart => self.restart(),
            InputEvent::ShowControls => self.show_controls(now_ms),
            InputEvent::ToggleControls => self.toggle_controls(now_ms),
            InputEvent::Exit => return InputOutcome::ExitRequested,
        }

        InputOutcome::Continue
    }
}
