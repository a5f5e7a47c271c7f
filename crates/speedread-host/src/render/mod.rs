pub mod terminal;

use speedread_core::render::Screen;

pub use terminal::{TerminalFrame, TerminalRenderer};

pub trait FrameRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut TerminalFrame);
}
