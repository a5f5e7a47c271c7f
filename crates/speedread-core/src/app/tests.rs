use alloc::{string::String, vec};

use proptest::prelude::*;

use super::*;
use crate::{content::tokenize, input::InputEvent, render::Screen};

struct ScriptedInput<'a> {
    events: &'a [InputEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    const fn new(events: &'a [InputEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

struct FailingInput;

impl InputProvider for FailingInput {
    type Error = &'static str;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Err("disconnected")
    }
}

// Plain five-letter words so every step takes the base delay.
fn plain_text(count: usize) -> String {
    vec!["words"; count].join(" ")
}

fn engine_with(text: &str) -> PlaybackEngine {
    let mut engine = PlaybackEngine::new(ReaderConfig::default());
    engine.load(tokenize(text), 0);
    engine
}

#[test]
fn plays_to_the_end_and_completes_once() {
    // 250 wpm -> 240 ms per plain word
    let mut engine = engine_with("one two three");
    assert!(engine.play(0));
    assert_eq!(engine.advance_timer.deadline_ms, Some(240));

    assert_eq!(engine.tick(240), TickResult::RenderRequested);
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.tick(480), TickResult::RenderRequested);
    assert_eq!(engine.current_index(), 2);
    assert_eq!(engine.tick(720), TickResult::Completed);

    assert_eq!(engine.state(), PlaybackState::Complete);
    assert_eq!(engine.current_index(), 3);
    assert_eq!(engine.next_deadline_ms(), None);
    assert_eq!(engine.tick(60_000), TickResult::NoRender);
    assert!(!engine.play(60_000));
}

#[test]
fn restart_rearms_completion() {
    let mut engine = engine_with("solo");
    engine.play(0);
    assert_eq!(engine.tick(240), TickResult::Completed);

    engine.restart();
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.current_index(), 0);
    assert!(engine.controls_visible());

    engine.play(1_000);
    let _ = engine.tick(1_000);
    assert_eq!(engine.tick(1_240), TickResult::Completed);
}

#[test]
fn early_ticks_do_not_advance() {
    let mut engine = engine_with("one two three");
    engine.play(0);
    let _ = engine.tick(0);
    assert_eq!(engine.tick(239), TickResult::NoRender);
    assert_eq!(engine.current_index(), 0);
}

#[test]
fn pause_halts_advancement() {
    let mut engine = engine_with("one two three");
    engine.play(0);
    assert!(engine.pause());

    assert_eq!(engine.next_deadline_ms(), None);
    let _ = engine.tick(100_000);
    assert_eq!(engine.tick(200_000), TickResult::NoRender);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(!engine.pause());
}

#[test]
fn skip_cancels_the_stale_step_and_reschedules() {
    let mut engine = engine_with(&plain_text(30));
    engine.play(0);

    engine.skip_forward(10, 100);
    assert_eq!(engine.current_index(), 10);
    assert_eq!(engine.advance_timer.deadline_ms, Some(340));

    // the step scheduled against the pre-skip cursor never lands
    let _ = engine.tick(240);
    assert_eq!(engine.current_index(), 10);

    let _ = engine.tick(340);
    assert_eq!(engine.current_index(), 11);
    assert!(engine.is_playing());
}

#[test]
fn skip_clamps_to_the_last_word_and_keeps_play_state() {
    let mut engine = engine_with(&plain_text(15));
    engine.skip_forward(100, 0);
    assert_eq!(engine.current_index(), 14);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(!engine.advance_timer.is_armed());

    engine.skip_backward(3, 0);
    assert_eq!(engine.current_index(), 11);
    engine.skip_backward(100, 0);
    assert_eq!(engine.current_index(), 0);
}

#[test]
fn skip_out_of_complete_returns_to_idle() {
    let mut engine = engine_with("one two");
    engine.play(0);
    let _ = engine.tick(240);
    assert_eq!(engine.tick(480), TickResult::Completed);

    engine.skip_backward(1, 500);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.current_index(), 1);

    engine.play(500);
    let _ = engine.tick(500);
    assert_eq!(engine.tick(740), TickResult::Completed);
}

#[test]
fn braking_applies_from_the_next_step() {
    let mut engine = engine_with(&plain_text(5));
    engine.play(0);
    assert!(engine.set_braking(true));

    // in-flight step keeps its deadline
    assert_eq!(engine.advance_timer.deadline_ms, Some(240));
    let _ = engine.tick(240);
    assert_eq!(engine.advance_timer.deadline_ms, Some(720));

    assert!(engine.set_braking(false));
    let _ = engine.tick(720);
    assert_eq!(engine.advance_timer.deadline_ms, Some(960));
}

#[test]
fn braking_is_ignored_unless_playing_and_cleared_on_pause() {
    let mut engine = engine_with("one two three");
    assert!(!engine.set_braking(true));
    assert!(!engine.is_braking());

    engine.play(0);
    engine.set_braking(true);
    engine.pause();
    assert!(!engine.is_braking());
}

#[test]
fn paragraph_end_doubles_the_delay() {
    let mut engine = engine_with("end.\n\nnext word");
    // period: 240 * 2 = 480, doubled for the paragraph break
    assert_eq!(engine.step_delay_ms(), 960);

    engine.set_dynamic_pacing(false);
    assert_eq!(engine.step_delay_ms(), 480);
}

#[test]
fn speed_change_applies_from_the_next_step() {
    let mut engine = engine_with(&plain_text(5));
    engine.play(0);
    engine.set_wpm(500);

    assert_eq!(engine.advance_timer.deadline_ms, Some(240));
    let _ = engine.tick(240);
    assert_eq!(engine.advance_timer.deadline_ms, Some(360));
}

#[test]
fn adjust_wpm_steps_within_bounds() {
    let mut engine = PlaybackEngine::new(ReaderConfig {
        wpm: 895,
        ..ReaderConfig::default()
    });
    assert!(engine.adjust_wpm(true));
    assert_eq!(engine.wpm(), 900);
    assert!(!engine.adjust_wpm(true));

    engine.set_wpm(105);
    assert!(engine.adjust_wpm(false));
    assert_eq!(engine.wpm(), 100);
    assert!(!engine.adjust_wpm(false));
}

#[test]
fn new_orders_inverted_bounds_and_clamps_speed() {
    let engine = PlaybackEngine::new(ReaderConfig {
        wpm: 2_000,
        min_wpm: 900,
        max_wpm: 100,
        ..ReaderConfig::default()
    });
    let config = engine.config();
    assert_eq!((config.min_wpm, config.max_wpm), (100, 900));
    assert_eq!(engine.wpm(), 900);
}

#[test]
fn controls_auto_hide_while_playing() {
    let mut engine = engine_with(&plain_text(100));
    engine.set_wpm(100);
    engine.play(0);
    assert!(engine.controls_visible());
    assert_eq!(engine.auto_hide_timer.deadline_ms, Some(8_000));

    let _ = engine.tick(8_000);
    assert!(!engine.controls_visible());

    engine.show_controls(9_000);
    assert!(engine.controls_visible());
    assert_eq!(engine.auto_hide_timer.deadline_ms, Some(17_000));

    // an explicit show restarts the countdown
    engine.show_controls(12_000);
    let _ = engine.tick(17_000);
    assert!(engine.controls_visible());
    let _ = engine.tick(20_000);
    assert!(!engine.controls_visible());
}

#[test]
fn pause_forces_controls_visible_and_cancels_auto_hide() {
    let mut engine = engine_with(&plain_text(10));
    engine.play(0);
    engine.toggle_controls(10);
    assert!(!engine.controls_visible());

    engine.pause();
    assert!(engine.controls_visible());
    assert!(!engine.auto_hide_timer.is_armed());
}

#[test]
fn controls_never_auto_hide_while_idle() {
    let mut engine = engine_with("one two");
    engine.show_controls(0);
    assert!(!engine.auto_hide_timer.is_armed());
    let _ = engine.tick(50_000);
    assert!(engine.controls_visible());
}

#[test]
fn empty_sequence_completes_on_next_tick() {
    let mut engine = PlaybackEngine::new(ReaderConfig::default());
    engine.load(tokenize("   \n\n  "), 0);
    assert_eq!(engine.total_words(), 0);

    assert!(engine.play(0));
    assert_eq!(engine.next_deadline_ms(), Some(0));
    assert_eq!(engine.tick(0), TickResult::Completed);
    assert_eq!(engine.state(), PlaybackState::Complete);
    assert_eq!(engine.current_index(), 0);

    engine.skip_forward(10, 0);
    assert_eq!(engine.state(), PlaybackState::Complete);
}

#[test]
fn load_clamps_start_and_cancels_timers() {
    let mut engine = engine_with(&plain_text(20));
    engine.play(0);
    engine.set_braking(true);

    engine.load(tokenize("a b c"), 99);
    assert_eq!(engine.current_index(), 3);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(!engine.is_braking());
    assert_eq!(engine.next_deadline_ms(), None);

    engine.play(5);
    assert_eq!(engine.tick(5), TickResult::Completed);
}

#[test]
fn drain_reports_words_advanced() {
    let mut engine = engine_with(&plain_text(10));
    engine.play(0);
    for step in 1..=4u64 {
        let _ = engine.tick(step * 240);
    }
    assert_eq!(engine.drain_word_updates(), 4);
    assert_eq!(engine.drain_word_updates(), 0);
}

#[test]
fn scripted_input_drives_transport_until_exit() {
    let events = [
        InputEvent::SpeedUp,
        InputEvent::SpeedUp,
        InputEvent::TogglePlayPause,
        InputEvent::Exit,
        InputEvent::SlowDown,
    ];
    let mut input = ScriptedInput::new(&events);
    let mut engine = engine_with(&plain_text(10));

    assert_eq!(engine.process_inputs(&mut input, 0), InputOutcome::ExitRequested);
    assert_eq!(engine.wpm(), 270);
    assert!(engine.is_playing());

    assert_eq!(engine.process_inputs(&mut input, 0), InputOutcome::Continue);
    assert_eq!(engine.wpm(), 260);
}

#[test]
fn input_errors_do_not_stop_the_engine() {
    let mut engine = engine_with("one two");
    assert_eq!(
        engine.process_inputs(&mut FailingInput, 0),
        InputOutcome::Continue
    );
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[test]
fn brake_and_skip_events_map_to_transport() {
    let mut engine = engine_with(&plain_text(30));
    engine.apply_input(InputEvent::TogglePlayPause, 0);
    engine.apply_input(InputEvent::ToggleBrake, 0);
    assert!(engine.is_braking());

    engine.apply_input(InputEvent::SkipForward, 0);
    assert_eq!(engine.current_index(), 10);
    engine.apply_input(InputEvent::SkipBackward, 0);
    assert_eq!(engine.current_index(), 0);

    engine.apply_input(InputEvent::Restart, 0);
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[test]
fn screen_reflects_reading_and_completion() {
    let mut engine = engine_with("Hello world.");

    let mut seen = None;
    engine.with_screen(|screen| {
        if let Screen::Reading { word, paused, progress, .. } = screen {
            seen = Some((String::from(word.text.as_str()), paused, progress.percent));
        }
    });
    assert_eq!(seen, Some((String::from("Hello"), true, 0)));

    engine.play(0);
    let _ = engine.tick(240);
    let mut percent = None;
    engine.with_screen(|screen| {
        if let Screen::Reading { progress, paused, .. } = screen {
            assert!(!paused);
            percent = Some(progress.percent);
        }
    });
    assert_eq!(percent, Some(50));

    let _ = engine.tick(720);
    let mut complete = false;
    engine.with_screen(|screen| complete = matches!(screen, Screen::Complete { total_words: 2, .. }));
    assert!(complete);
}

#[test]
fn empty_engine_renders_empty_screen() {
    let engine = PlaybackEngine::new(ReaderConfig::default());
    let mut empty = false;
    engine.with_screen(|screen| empty = matches!(screen, Screen::Empty { wpm: 250, .. }));
    assert!(empty);
}

#[test]
fn persisted_settings_follow_live_changes() {
    let mut engine = engine_with("one two");
    assert_eq!(
        engine.persisted_settings(),
        PersistedSettings::new(250, true, Theme::Dark)
    );

    engine.adjust_wpm(true);
    engine.set_dynamic_pacing(false);
    engine.set_theme(Theme::Light);
    assert_eq!(
        engine.persisted_settings(),
        PersistedSettings::new(260, false, Theme::Light)
    );
}

#[derive(Clone, Debug)]
enum Op {
    Load { words: usize, start: usize },
    Play,
    Pause,
    SkipForward(usize),
    SkipBackward(usize),
    Restart,
    Brake(bool),
    ShowControls,
    Wait,
}

impl Op {
    fn may_move_back(&self) -> bool {
        matches!(
            self,
            Op::Load { .. } | Op::SkipForward(_) | Op::SkipBackward(_) | Op::Restart
        )
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..12, 0usize..16).prop_map(|(words, start)| Op::Load { words, start }),
        Just(Op::Play),
        Just(Op::Pause),
        (1usize..5).prop_map(Op::SkipForward),
        (1usize..5).prop_map(Op::SkipBackward),
        Just(Op::Restart),
        any::<bool>().prop_map(Op::Brake),
        Just(Op::ShowControls),
        Just(Op::Wait),
    ]
}

proptest! {
    #[test]
    fn random_sessions_keep_playback_invariants(
        initial_words in 0usize..12,
        steps in proptest::collection::vec((op(), 0u64..1_500), 1..80),
    ) {
        let mut engine = engine_with(&plain_text(initial_words));
        let mut now_ms = 0u64;
        let mut completion_pending = true;

        for (op, delta_ms) in steps {
            now_ms += delta_ms;
            let before = engine.current_index();
            let was_complete = engine.state() == PlaybackState::Complete;

            match op {
                Op::Load { words, start } => {
                    engine.load(tokenize(&plain_text(words)), start);
                    completion_pending = true;
                }
                Op::Play => {
                    engine.play(now_ms);
                }
                Op::Pause => {
                    engine.pause();
                }
                Op::SkipForward(count) => engine.skip_forward(count, now_ms),
                Op::SkipBackward(count) => engine.skip_backward(count, now_ms),
                Op::Restart => {
                    engine.restart();
                    completion_pending = true;
                }
                Op::Brake(on) => {
                    engine.set_braking(on);
                }
                Op::ShowControls => engine.show_controls(now_ms),
                Op::Wait => {}
            }
            if was_complete && engine.state() != PlaybackState::Complete {
                completion_pending = true;
            }

            if engine.tick(now_ms) == TickResult::Completed {
                prop_assert!(completion_pending, "completed twice in one run");
                completion_pending = false;
            }

            let index = engine.current_index();
            prop_assert!(index <= engine.total_words());
            if !op.may_move_back() {
                prop_assert!(index >= before, "{:?} moved {} -> {}", op, before, index);
            }
            if engine.state() == PlaybackState::Complete {
                prop_assert_eq!(index, engine.total_words());
            }
            if engine.is_braking() {
                prop_assert!(engine.is_playing());
            }
        }
    }
}
