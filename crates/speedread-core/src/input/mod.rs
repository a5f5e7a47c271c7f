//! Input abstraction layer.

/// Logical actions consumed by the playback engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    TogglePlayPause,
    SkipForward,
    SkipBackward,
    SpeedUp,
    SlowDown,
    ToggleBrake,
    Restart,
    ShowControls,
    ToggleControls,
    Exit,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
