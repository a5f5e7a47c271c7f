use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use speedread_core::{
    render::Theme,
    settings::{PersistedSettings, SettingsStore},
};

use super::{JsonFile, SETTINGS_FILE_NAME, StoreError};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ThemeName {
    Dark,
    Light,
}

impl From<Theme> for ThemeName {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::Dark,
            Theme::Light => Self::Light,
        }
    }
}

impl From<ThemeName> for Theme {
    fn from(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self::Dark,
            ThemeName::Light => Self::Light,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFileRecord {
    wpm: u16,
    dynamic_pacing: bool,
    #[serde(default = "default_theme")]
    theme: ThemeName,
}

fn default_theme() -> ThemeName {
    ThemeName::Dark
}

#[derive(Clone, Debug)]
pub struct FileSettingsStore {
    file: JsonFile,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SETTINGS_FILE_NAME))
    }
}

impl SettingsStore for FileSettingsStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let Some(record) = self.file.read::<SettingsFileRecord>()? else {
            return Ok(None);
        };
        if record.wpm == 0 {
            return Err(StoreError::Invalid("wpm must be positive"));
        }

        Ok(Some(PersistedSettings::new(
            record.wpm,
            record.dynamic_pacing,
            record.theme.into(),
        )))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.file.write(&SettingsFileRecord {
            wpm: settings.wpm,
            dynamic_pacing: settings.dynamic_pacing,
            theme: settings.theme.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn settings_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let saved = PersistedSettings::new(420, false, Theme::Light);
        FileSettingsStore::in_dir(dir.path()).save(&saved).unwrap();

        let loaded = FileSettingsStore::in_dir(dir.path()).load().unwrap();
        assert_eq!(loaded, Some(saved));
    }

    #[test]
    fn missing_theme_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, br#"{"wpm":300,"dynamicPacing":true}"#).unwrap();

        let loaded = FileSettingsStore::new(path).load().unwrap().unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.wpm, 300);
    }

    #[test]
    fn zero_wpm_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, br#"{"wpm":0,"dynamicPacing":true,"theme":"light"}"#).unwrap();
        assert!(matches!(
            FileSettingsStore::new(path).load(),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(FileSettingsStore::in_dir(dir.path()).load().unwrap(), None);
    }
}
