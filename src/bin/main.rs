use std::{
    env,
    fs::OpenOptions,
    io::{self, IsTerminal},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};
use log::{info, warn};
use speedread_core::{
    app::{InputOutcome, PlaybackEngine, ReaderConfig, TickResult},
    content::{WordSequence, estimate_reading_minutes, tokenize},
    input::InputEvent,
    render::{Screen, Theme},
    session::{ResumeOffer, SessionKeeper, fingerprint},
    settings::{PersistedSettings, SettingsStore},
    text_policy::COMPACT_MAX_WORDS,
};
use speedread_host::{
    document::{DocumentError, DocumentKind, load_document, read_document},
    render::{FrameRenderer, TerminalFrame, TerminalRenderer, terminal::MIN_WIDTH},
    storage::{FileSessionStore, FileSettingsStore},
};

use cli::Cli;
use keyboard_task::{ChannelInput, INPUT, spawn_keyboard_reader};
use settings_sync::SettingsSyncState;
use terminal::{RawTerminal, env_columns};

#[path = "main/cli.rs"]
mod cli;
#[path = "main/keyboard_task.rs"]
mod keyboard_task;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/terminal.rs"]
mod terminal;

const STATE_DIR_NAME: &str = ".speedread";
const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const IDLE_WAKE_MS: u64 = 250;
const RESIZE_CHECK_MS: u64 = 1_000;
const REPORT_INTERVAL_MS: u64 = 5_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ResumeChoice {
    Resume,
    StartFresh,
    Quit,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let cli = Cli::parse();
    init_logging(&cli);

    let code = run(cli).await;
    // `run` has already restored the terminal.
    std::process::exit(code);
}

fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_level).parse_default_env();

    if let Some(path) = &cli.log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => eprintln!("speedread: cannot open log file {}: {err}", path.display()),
        }
    }

    builder.init();
}

/// Reads the document and runs the reader; returns the process exit code.
async fn run(cli: Cli) -> i32 {
    let text = match read_text(&cli) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("speedread: {err}");
            return 1;
        }
    };

    let state_dir = resolve_state_dir(cli.state_dir.clone());
    let mut settings_store = FileSettingsStore::in_dir(&state_dir);
    let settings = effective_settings(&cli, load_settings(&mut settings_store));

    let words = tokenize(&text);
    let print = fingerprint(&text);
    info!(
        "reader: loaded words={} fingerprint={} estimate_minutes={} wpm={}",
        words.len(),
        print,
        estimate_reading_minutes(words.len(), settings.wpm),
        settings.wpm
    );

    let raw_terminal = match RawTerminal::enter() {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!("terminal: raw mode unavailable ({}); running without keyboard", err);
            None
        }
    };
    let keyboard_attached = raw_terminal.is_some()
        && match spawn_keyboard_reader() {
            Ok(()) => true,
            Err(err) => {
                warn!("keyboard: reader thread failed to start: {}", err);
                false
            }
        };

    let color = !cli.no_color && io::stdout().is_terminal();
    let mut renderer = TerminalRenderer::new(color);
    let columns = || raw_terminal.as_ref().map_or_else(env_columns, RawTerminal::columns);
    let mut frame = TerminalFrame::new(columns());

    let mut keeper = SessionKeeper::new(FileSessionStore::in_dir(&state_dir));
    let now_epoch_ms = epoch_ms();
    let offer = if cli.fresh {
        keeper.start_fresh();
        None
    } else {
        keeper.offer_resume(&print, now_epoch_ms)
    };

    let mut start_index = 0usize;
    if let Some(offer) = offer {
        let choice = if cli.resume || !keyboard_attached {
            ResumeChoice::Resume
        } else {
            prompt_resume(offer, &words, settings.theme, &mut renderer, &mut frame).await
        };
        info!(
            "session: offer position={}/{} choice={:?}",
            offer.position, offer.total_words, choice
        );

        match choice {
            ResumeChoice::Resume => start_index = offer.position,
            ResumeChoice::StartFresh => keeper.start_fresh(),
            ResumeChoice::Quit => return 0,
        }
    }

    let mut engine = PlaybackEngine::new(ReaderConfig {
        wpm: settings.wpm,
        dynamic_pacing: settings.dynamic_pacing,
        ..ReaderConfig::default()
    });
    engine.set_theme(settings.theme);
    engine.load(words, start_index);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis();
    // Without a keyboard nobody can press play.
    if cli.autoplay || !keyboard_attached {
        engine.play(now_ms());
    }

    let mut settings_sync = SettingsSyncState::new(engine.persisted_settings());
    let mut force_render = true;
    let mut last_resize_check_ms = 0u64;
    let mut report_words = 0u64;
    let mut report_start_ms = 0u64;

    loop {
        let now = now_ms();
        if engine.process_inputs(&mut ChannelInput, now) == InputOutcome::ExitRequested {
            break;
        }

        let tick = engine.tick(now);
        if tick == TickResult::Completed {
            keeper.record_completion();
            if !keyboard_attached {
                engine.with_screen(|screen| renderer.render(screen, &mut frame));
                present(&frame);
                break;
            }
        }

        if now.saturating_sub(last_resize_check_ms) >= RESIZE_CHECK_MS {
            last_resize_check_ms = now;
            let width = columns();
            if width.max(MIN_WIDTH) != frame.width() {
                frame.set_width(width);
                force_render = true;
            }
        }

        if tick != TickResult::NoRender || force_render {
            engine.with_screen(|screen| renderer.render(screen, &mut frame));
            present(&frame);
            force_render = false;
        }

        settings_sync.track_current(engine.persisted_settings(), now);
        settings_sync.flush_if_due(&mut settings_store, now);

        report_words = report_words.saturating_add(u64::from(engine.drain_word_updates()));
        let elapsed_ms = now.saturating_sub(report_start_ms);
        if elapsed_ms >= REPORT_INTERVAL_MS {
            if report_words > 0 {
                let wpm_x100 = report_words * 6_000_000 / elapsed_ms;
                info!(
                    "effective_wpm={}.{:02} words={} elapsed_ms={}",
                    wpm_x100 / 100,
                    wpm_x100 % 100,
                    report_words,
                    elapsed_ms
                );
            }
            report_words = 0;
            report_start_ms = now;
        }

        let idle_wake = now.saturating_add(IDLE_WAKE_MS);
        let wake_at = engine.next_deadline_ms().map_or(idle_wake, |d| d.min(idle_wake));
        let deadline = clock + Duration::from_millis(wake_at);
        if let Either::Second(event) = select(Timer::at(deadline), INPUT.receive()).await
            && engine.apply_input(event, now_ms()) == InputOutcome::ExitRequested
        {
            break;
        }
    }

    let exit_epoch_ms = epoch_ms();
    if keeper.record_exit(&print, engine.current_index(), engine.total_words(), exit_epoch_ms) {
        info!(
            "session: saved position={}/{}",
            engine.current_index(),
            engine.total_words()
        );
    }
    settings_sync.track_current(engine.persisted_settings(), now_ms());
    settings_sync.flush_now(&mut settings_store);

    drop(raw_terminal);
    info!("reader: exit");
    0
}

fn read_text(cli: &Cli) -> Result<String, DocumentError> {
    match cli.document_path() {
        Some(path) => load_document(path, cli.kind),
        None => {
            let kind = cli.kind.unwrap_or(DocumentKind::PlainText);
            info!("document: reading stdin kind={}", kind.label());
            read_document(io::stdin().lock(), kind)
        }
    }
}

fn resolve_state_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STATE_DIR_NAME)
    })
}

fn load_settings(store: &mut FileSettingsStore) -> Option<PersistedSettings> {
    match store.load() {
        Ok(Some(settings)) => {
            info!("settings: restored wpm={}", settings.wpm);
            Some(settings)
        }
        Ok(None) => {
            info!("settings: none saved; using defaults");
            None
        }
        Err(err) => {
            warn!("settings: load failed, using defaults: {}", err);
            None
        }
    }
}

/// Saved settings overlaid with command-line choices.
fn effective_settings(cli: &Cli, saved: Option<PersistedSettings>) -> PersistedSettings {
    let defaults = ReaderConfig::default();
    let mut settings = saved.unwrap_or(PersistedSettings::new(
        defaults.wpm,
        defaults.dynamic_pacing,
        Theme::default(),
    ));

    if let Some(wpm) = cli.wpm {
        settings.wpm = wpm;
    }
    if cli.no_dynamic_pacing {
        settings.dynamic_pacing = false;
    }
    if let Some(theme) = cli.theme {
        settings.theme = theme.into();
    }
    settings
}

/// Shows the resume offer and waits for play/pause (resume), restart (start
/// over) or exit. Other keys are ignored.
async fn prompt_resume(
    offer: ResumeOffer,
    words: &WordSequence,
    theme: Theme,
    renderer: &mut TerminalRenderer,
    frame: &mut TerminalFrame,
) -> ResumeChoice {
    let preview = words
        .iter()
        .skip(offer.position)
        .take(COMPACT_MAX_WORDS + 1)
        .map(|word| word.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    renderer.render(
        Screen::ResumePrompt {
            offer,
            preview: &preview,
            theme,
        },
        frame,
    );
    present(frame);

    loop {
        match INPUT.receive().await {
            InputEvent::TogglePlayPause => return ResumeChoice::Resume,
            InputEvent::Restart => return ResumeChoice::StartFresh,
            InputEvent::Exit => return ResumeChoice::Quit,
            _ => {}
        }
    }
}

fn present(frame: &TerminalFrame) {
    if let Err(err) = frame.write_to(&mut io::stdout().lock()) {
        warn!("render: write failed: {}", err);
    }
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
