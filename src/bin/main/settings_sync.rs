use core::fmt::Debug;

use log::{info, warn};
use speedread_core::settings::{PersistedSettings, SettingsStore};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

/// Debounced writer for live settings changes.
pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S>(&mut self, store: &mut S, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }

        if !self.save(store) {
            // Retry after another quiet period.
            if let Some((_, changed_at_ms)) = self.pending.as_mut() {
                *changed_at_ms = now_ms;
            }
        }
    }

    /// Writes any pending change immediately, e.g. on exit.
    pub(super) fn flush_now<S>(&mut self, store: &mut S)
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        if self.pending.is_some() {
            self.save(store);
        }
    }

    fn save<S>(&mut self, store: &mut S) -> bool
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        let Some((candidate, _)) = self.pending else {
            return true;
        };

        match store.save(&candidate) {
            Ok(()) => {
                info!(
                    "settings: saved wpm={} dynamic_pacing={} theme={}",
                    candidate.wpm,
                    candidate.dynamic_pacing,
                    candidate.theme.label()
                );
                self.last_saved = candidate;
                self.pending = None;
                true
            }
            Err(err) => {
                warn!("settings: save failed: {:?}", err);
                false
            }
        }
    }
}
