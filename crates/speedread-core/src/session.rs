//! Content fingerprints and the resume-position record.
//!
//! A text is identified by [`fingerprint`]; one [`SessionRecord`] remembers
//! where the reader left it. Stores are fallible, but [`SessionKeeper`] maps
//! every store failure to "no saved session" so playback never depends on
//! persistence.

use core::fmt::Write as _;

use heapless::String;
use log::{debug, info, warn};

use crate::text_policy::rounded_percent;

/// Saved positions older than this are ignored and cleared.
pub const SESSION_MAX_AGE_MS: u64 = 7 * 24 * 60 * 60 * 1_000;
/// Leading UTF-16 code units of the trimmed text that feed the fingerprint.
pub const FINGERPRINT_PREVIEW_UNITS: usize = 100;
/// Base-36 rendering of a 32-bit magnitude takes at most 7 digits.
pub const FINGERPRINT_BYTES: usize = 8;

pub type Fingerprint = String<FINGERPRINT_BYTES>;

/// Content-derived identifier used to match a saved session to its text.
///
/// Hashes `"{preview}|{length}|{word_count}"` of the trimmed text, where the
/// preview and length are measured in UTF-16 code units, using `h * 31 + c`
/// on wrapping 32-bit integers. The magnitude is rendered in base 36. This is
/// a heuristic identity, not a digest.
pub fn fingerprint(text: &str) -> Fingerprint {
    let trimmed = text.trim();
    let length = trimmed.encode_utf16().count();
    let word_count = trimmed.split_whitespace().count();

    let mut hash = 0i32;
    for unit in trimmed.encode_utf16().take(FINGERPRINT_PREVIEW_UNITS) {
        hash = fold_unit(hash, unit);
    }

    let mut suffix = String::<48>::new();
    let _ = write!(suffix, "|{length}|{word_count}");
    for unit in suffix.bytes() {
        hash = fold_unit(hash, unit as u16);
    }

    to_base36((hash as i64).unsigned_abs())
}

fn fold_unit(hash: i32, unit: u16) -> i32 {
    hash.wrapping_shl(5)
        .wrapping_sub(hash)
        .wrapping_add(unit as i32)
}

fn to_base36(mut value: u64) -> Fingerprint {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut out = Fingerprint::new();
    if value == 0 {
        let _ = out.push('0');
        return out;
    }

    let mut tmp = [0u8; FINGERPRINT_BYTES];
    let mut n = 0usize;
    while value > 0 && n < tmp.len() {
        tmp[n] = DIGITS[(value % 36) as usize];
        value /= 36;
        n += 1;
    }

    for &digit in tmp[..n].iter().rev() {
        let _ = out.push(digit as char);
    }
    out
}

/// One saved reading position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionRecord {
    pub fingerprint: Fingerprint,
    pub position: usize,
    pub total_words: usize,
    pub saved_at_epoch_ms: u64,
}

impl SessionRecord {
    /// Whether the record is at most [`SESSION_MAX_AGE_MS`] old at `now`.
    pub fn is_fresh(&self, now_epoch_ms: u64) -> bool {
        now_epoch_ms.saturating_sub(self.saved_at_epoch_ms) <= SESSION_MAX_AGE_MS
    }
}

/// Abstract session persistence backend holding at most one record.
pub trait SessionStore {
    type Error: core::fmt::Debug;

    fn load(&mut self) -> Result<Option<SessionRecord>, Self::Error>;
    fn save(&mut self, record: &SessionRecord) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Volatile store used when nothing should touch disk.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    record: Option<SessionRecord>,
}

impl MemorySessionStore {
    pub const fn new() -> Self {
        Self { record: None }
    }
}

impl SessionStore for MemorySessionStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<Option<SessionRecord>, Self::Error> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), Self::Error> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.record = None;
        Ok(())
    }
}

/// Saved position offered to the reader when a known text is reopened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResumeOffer {
    pub position: usize,
    pub total_words: usize,
    /// 0..=100, rounded
    pub percent: u8,
}

/// Session-boundary persistence policy over a [`SessionStore`].
#[derive(Debug)]
pub struct SessionKeeper<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionKeeper<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Record for `fingerprint` if it exists and is fresh.
    ///
    /// Stale records are cleared. Store failures read as "absent".
    pub fn load(&mut self, fingerprint: &str, now_epoch_ms: u64) -> Option<SessionRecord> {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                warn!("session: load failed, treating as absent: {:?}", err);
                return None;
            }
        };

        if record.fingerprint.as_str() != fingerprint {
            debug!(
                "session: saved fingerprint={} does not match {}",
                record.fingerprint, fingerprint
            );
            return None;
        }

        if !record.is_fresh(now_epoch_ms) {
            info!(
                "session: discarding stale record fingerprint={} saved_at={}",
                record.fingerprint, record.saved_at_epoch_ms
            );
            self.clear();
            return None;
        }

        Some(record)
    }

    /// Resume offer for a reopened text; only positions past the first word.
    pub fn offer_resume(&mut self, fingerprint: &str, now_epoch_ms: u64) -> Option<ResumeOffer> {
        let record = self.load(fingerprint, now_epoch_ms)?;
        if record.position == 0 {
            return None;
        }

        Some(ResumeOffer {
            position: record.position,
            total_words: record.total_words,
            percent: rounded_percent(record.position, record.total_words),
        })
    }

    pub fn save(
        &mut self,
        fingerprint: &str,
        position: usize,
        total_words: usize,
        now_epoch_ms: u64,
    ) -> bool {
        let mut print = Fingerprint::new();
        if print.push_str(fingerprint).is_err() {
            warn!("session: fingerprint {} too long to store", fingerprint);
            return false;
        }

        let record = SessionRecord {
            fingerprint: print,
            position,
            total_words,
            saved_at_epoch_ms: now_epoch_ms,
        };
        match self.store.save(&record) {
            Ok(()) => {
                debug!(
                    "session: saved fingerprint={} position={}/{}",
                    record.fingerprint, position, total_words
                );
                true
            }
            Err(err) => {
                warn!("session: save failed: {:?}", err);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!("session: clear failed: {:?}", err);
        }
    }

    /// Saves a mid-text exit; positions at the start or end are not worth resuming.
    pub fn record_exit(
        &mut self,
        fingerprint: &str,
        position: usize,
        total_words: usize,
        now_epoch_ms: u64,
    ) -> bool {
        if position == 0 || position >= total_words {
            return false;
        }
        self.save(fingerprint, position, total_words, now_epoch_ms)
    }

    /// A finished text has nothing left to resume.
    pub fn record_completion(&mut self) {
        self.clear();
    }

    /// Reader declined the offer: drop the old position.
    pub fn start_fresh(&mut self) {
        self.clear();
    }
}
