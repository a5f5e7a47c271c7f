use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use speedread_core::session::{Fingerprint, SessionRecord, SessionStore};

use super::{JsonFile, SESSION_FILE_NAME, StoreError};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionFileRecord {
    content_hash: String,
    position: usize,
    total_words: usize,
    saved_at: u64,
}

impl From<&SessionRecord> for SessionFileRecord {
    fn from(record: &SessionRecord) -> Self {
        Self {
            content_hash: record.fingerprint.as_str().to_owned(),
            position: record.position,
            total_words: record.total_words,
            saved_at: record.saved_at_epoch_ms,
        }
    }
}

impl TryFrom<SessionFileRecord> for SessionRecord {
    type Error = StoreError;

    fn try_from(record: SessionFileRecord) -> Result<Self, Self::Error> {
        let mut fingerprint = Fingerprint::new();
        fingerprint
            .push_str(&record.content_hash)
            .map_err(|_| StoreError::Invalid("content hash too long"))?;

        Ok(Self {
            fingerprint,
            position: record.position,
            total_words: record.total_words,
            saved_at_epoch_ms: record.saved_at,
        })
    }
}

/// Single reading session kept in `session.json`.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    file: JsonFile,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl SessionStore for FileSessionStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<SessionRecord>, Self::Error> {
        self.file
            .read::<SessionFileRecord>()?
            .map(SessionRecord::try_from)
            .transpose()
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), Self::Error> {
        self.file.write(&SessionFileRecord::from(record))
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.file.remove()
    }
}
