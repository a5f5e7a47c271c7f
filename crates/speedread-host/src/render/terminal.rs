//! Styled text renderer for the RSVP screens.

use std::io;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, ContentStyle, Print, Stylize},
    terminal::{Clear, ClearType},
};
use speedread_core::{
    content::Word,
    render::{ProgressView, Screen, Theme},
    session::ResumeOffer,
    text_policy::preview_compact,
};

use super::FrameRenderer;

/// Column of the ORP letter, as a share of the line width.
pub const ORP_ANCHOR_PERCENT: usize = 42;
pub const MIN_WIDTH: usize = 32;
const MIN_BAR_WIDTH: usize = 10;

const CONTROLS_HINT: &str = "space play/pause  </> skip  ^/v speed  b brake  r restart  q quit";
const PAUSED_HINT: &str = "space resume  c controls  q quit";

#[derive(Clone, Copy)]
struct Palette {
    base: ContentStyle,
    orp: ContentStyle,
    dim: ContentStyle,
    accent: ContentStyle,
}

impl Palette {
    fn for_theme(theme: Theme, color: bool) -> Self {
        let plain = ContentStyle::new();
        if !color {
            return Self {
                base: plain,
                orp: plain,
                dim: plain,
                accent: plain,
            };
        }

        let (ink, paper, highlight, accent) = match theme {
            Theme::Dark => (Color::White, Color::Black, Color::Red, Color::Cyan),
            Theme::Light => (Color::Black, Color::White, Color::DarkRed, Color::DarkBlue),
        };
        Self {
            base: plain.with(ink).on(paper),
            orp: plain.with(highlight).on(paper).bold(),
            dim: plain.with(ink).on(paper).dim(),
            accent: plain.with(accent).on(paper),
        }
    }

    fn paint(&self, style: ContentStyle, text: &str) -> String {
        if style == ContentStyle::new() {
            return text.to_owned();
        }
        style.apply(text).to_string()
    }
}

/// One rendered screen: a fixed-width block of text lines.
#[derive(Clone, Debug)]
pub struct TerminalFrame {
    width: usize,
    lines: Vec<String>,
}

impl TerminalFrame {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            lines: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(MIN_WIDTH);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Clears the terminal and draws the frame from the top-left corner.
    /// Lines end in `\r\n` so output is correct with the tty in raw mode.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in &self.lines {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        out.flush()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TerminalRenderer {
    color: bool,
    orp_anchor_percent: usize,
}

impl TerminalRenderer {
    pub const fn new(color: bool) -> Self {
        Self {
            color,
            orp_anchor_percent: ORP_ANCHOR_PERCENT,
        }
    }

    pub fn orp_column(&self, width: usize) -> usize {
        width * self.orp_anchor_percent / 100
    }

    fn render_reading(
        &self,
        frame: &mut TerminalFrame,
        palette: Palette,
        reading: ReadingView<'_>,
    ) {
        let width = frame.width();
        let status = match (reading.paused, reading.is_braking) {
            (true, _) => "PAUSED",
            (false, true) => "BRAKING",
            (false, false) => "PLAYING",
        };
        let wpm_label = if reading.is_braking {
            format!("{} wpm (x0.5)", reading.wpm)
        } else {
            format!("{} wpm", reading.wpm)
        };
        frame.push(palette.paint(palette.accent, &spread("speedread", status, &wpm_label, width)));
        frame.blank();

        let anchor = self.orp_column(width);
        let marker = format!("{}|", " ".repeat(anchor));
        frame.push(palette.paint(palette.dim, &marker));
        frame.push(word_line(reading.word, anchor, palette, reading.is_braking));
        frame.push(palette.paint(palette.dim, &marker));
        frame.blank();

        frame.push(palette.paint(palette.base, &progress_line(reading.progress, width)));
        if reading.show_controls {
            let hint = if reading.paused { PAUSED_HINT } else { CONTROLS_HINT };
            frame.push(palette.paint(palette.dim, &clip(hint, width)));
        }
    }

    fn render_resume_prompt(
        &self,
        frame: &mut TerminalFrame,
        palette: Palette,
        offer: ResumeOffer,
        preview: &str,
    ) {
        let width = frame.width();
        let preview = preview_compact(preview);

        frame.push(palette.paint(palette.accent, "speedread"));
        frame.blank();
        frame.push(palette.paint(palette.base, "Resume where you left off?"));
        frame.push(palette.paint(
            palette.base,
            &format!(
                "word {} of {} ({}%)",
                offer.position + 1,
                offer.total_words,
                offer.percent
            ),
        ));
        frame.push(palette.paint(palette.dim, &clip(&format!("\"{preview}\""), width)));
        frame.blank();
        frame.push(palette.paint(palette.dim, "space resume  r start over  q quit"));
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

struct ReadingView<'a> {
    word: &'a Word,
    is_braking: bool,
    paused: bool,
    show_controls: bool,
    wpm: u16,
    progress: ProgressView,
}

impl FrameRenderer for TerminalRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut TerminalFrame) {
        frame.clear();

        match screen {
            Screen::Empty { wpm, theme } => {
                let palette = Palette::for_theme(theme, self.color);
                let header = spread("speedread", "", &format!("{wpm} wpm"), frame.width());
                frame.push(palette.paint(palette.accent, &header));
                frame.blank();
                frame.push(palette.paint(palette.base, "Nothing to read."));
            }
            Screen::Reading {
                word,
                is_braking,
                paused,
                show_controls,
                wpm,
                progress,
                theme,
            } => {
                let palette = Palette::for_theme(theme, self.color);
                self.render_reading(
                    frame,
                    palette,
                    ReadingView {
                        word,
                        is_braking,
                        paused,
                        show_controls,
                        wpm,
                        progress,
                    },
                );
            }
            Screen::Complete {
                total_words,
                wpm,
                theme,
            } => {
                let palette = Palette::for_theme(theme, self.color);
                frame.push(palette.paint(palette.accent, "speedread"));
                frame.blank();
                frame.push(palette.paint(palette.base, "Finished."));
                frame.push(palette.paint(
                    palette.base,
                    &format!("{total_words} words at {wpm} wpm"),
                ));
                frame.blank();
                frame.push(palette.paint(palette.dim, "r read again  q quit"));
            }
            Screen::ResumePrompt {
                offer,
                preview,
                theme,
            } => {
                let palette = Palette::for_theme(theme, self.color);
                self.render_resume_prompt(frame, palette, offer, preview);
            }
        }
    }
}

/// The word positioned so its ORP letter sits in column `anchor`.
fn word_line(word: &Word, anchor: usize, palette: Palette, braking: bool) -> String {
    let (before, orp, after) = word.split_at_orp();
    let lead = anchor.saturating_sub(before.chars().count());
    let side = if braking { palette.dim } else { palette.base };

    let mut line = " ".repeat(lead);
    line.push_str(&palette.paint(side, before));
    line.push_str(&palette.paint(palette.orp, orp));
    line.push_str(&palette.paint(side, after));
    line
}

fn progress_line(progress: ProgressView, width: usize) -> String {
    let shown = (progress.current_index + 1).min(progress.total_words);
    let counter = format!("{}/{}", shown, progress.total_words);
    let percent = format!("{:>3}%", progress.percent);

    let bar_width = width
        .saturating_sub(counter.len() + percent.len() + 4)
        .max(MIN_BAR_WIDTH);
    let filled = bar_width * usize::from(progress.percent.min(100)) / 100;

    format!(
        "{counter} [{}{}] {percent}",
        "#".repeat(filled),
        "-".repeat(bar_width - filled)
    )
}

/// `left`, `middle` and `right` spread across `width` columns.
fn spread(left: &str, middle: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + middle.chars().count() + right.chars().count();
    let gaps = width.saturating_sub(used).max(2);
    let first = gaps / 2;
    let second = gaps - first;
    clip(
        &format!(
            "{left}{}{middle}{}{right}",
            " ".repeat(first),
            " ".repeat(second)
        ),
        width,
    )
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
