//! JSON file backends for the core store traits.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod session_file;
mod settings_file;

pub use session_file::FileSessionStore;
pub use settings_file::FileSettingsStore;

pub const SESSION_FILE_NAME: &str = "session.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    Invalid(&'static str),
}

/// One JSON document on disk. A missing file reads as `None`.
#[derive(Clone, Debug)]
struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes a sibling temp file, then renames it over the record.
    fn write<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
