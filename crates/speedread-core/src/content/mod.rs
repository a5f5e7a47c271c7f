//! Word sequences for RSVP playback.

use alloc::{rc::Rc, string::String};

mod text_utils;
mod tokenizer;


pub use text_utils::{estimate_reading_minutes, word_count};
pub use tokenizer::{orp_index_for_len, split_trailing_punctuation, tokenize};

/// Trailing punctuation class of a token.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PunctuationType {
    #[default]
    None,
    Comma,
    Period,
    Other,
}

/// One display unit produced by [`tokenize`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    /// Original token, trailing punctuation included.
    pub text: String,
    /// Char index of the highlighted letter within `text`.
    pub orp_index: usize,
    pub has_trailing_punctuation: bool,
    pub punctuation_type: PunctuationType,
    /// Set on the final word of every paragraph but the last one.
    pub is_last_in_paragraph: bool,
}

impl Word {
    /// Token text without its trailing punctuation character.
    pub fn stripped(&self) -> &str {
        if !self.has_trailing_punctuation {
            return &self.text;
        }

        match self.text.char_indices().next_back() {
            Some((idx, _)) => &self.text[..idx],
            None => "",
        }
    }

    /// Splits `text` around the ORP character as `(before, orp, after)`.
    pub fn split_at_orp(&self) -> (&str, &str, &str) {
        let mut indices = self.text.char_indices().skip(self.orp_index);
        let Some((start, ch)) = indices.next() else {
            return (&self.text, "", "");
        };
        let end = start + ch.len_utf8();

        (&self.text[..start], &self.text[start..end], &self.text[end..])
    }
}

/// Immutable, shared word sequence. Re-tokenizing replaces it wholesale.
pub type WordSequence = Rc<[Word]>;

/// Shared empty sequence used before any text is loaded.
pub fn empty_sequence() -> WordSequence {
    Rc::from(alloc::vec::Vec::new())
}
