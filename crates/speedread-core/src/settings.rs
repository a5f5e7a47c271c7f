//! Persisted user settings abstraction.

use crate::render::Theme;

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub dynamic_pacing: bool,
    pub theme: Theme,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, dynamic_pacing: bool, theme: Theme) -> Self {
        Self {
            wpm,
            dynamic_pacing,
            theme,
        }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
