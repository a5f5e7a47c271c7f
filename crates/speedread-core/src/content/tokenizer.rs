use alloc::{string::ToString, vec::Vec};

use log::debug;

use super::{PunctuationType, Word, WordSequence, text_utils::paragraphs};

const EM_DASH: char = '\u{2014}';
const EN_DASH: char = '\u{2013}';

/// Builds the word sequence for `text`.
///
/// Blank or whitespace-only input yields an empty sequence.
pub fn tokenize(text: &str) -> WordSequence {
    let mut words = Vec::new();

    for paragraph in paragraphs(text) {
        let start = words.len();
        for raw in paragraph.split_whitespace() {
            words.push(build_word(raw));
        }
        if words.len() > start
            && let Some(last) = words.last_mut()
        {
            last.is_last_in_paragraph = true;
        }
    }

    // No trailing pause at the true end of the text.
    if let Some(last) = words.last_mut() {
        last.is_last_in_paragraph = false;
    }

    debug!("tokenize: words={} bytes={}", words.len(), text.len());
    WordSequence::from(words)
}

fn build_word(raw: &str) -> Word {
    let (stripped, punctuation_type) = split_trailing_punctuation(raw);

    Word {
        text: raw.to_string(),
        orp_index: orp_index_for_len(stripped.chars().count()),
        has_trailing_punctuation: punctuation_type != PunctuationType::None,
        punctuation_type,
        is_last_in_paragraph: false,
    }
}

/// Strips at most one trailing punctuation character from `token`.
pub fn split_trailing_punctuation(token: &str) -> (&str, PunctuationType) {
    let Some((idx, last)) = token.char_indices().next_back() else {
        return (token, PunctuationType::None);
    };

    let kind = match last {
        ',' => PunctuationType::Comma,
        '.' | '!' | '?' => PunctuationType::Period,
        ';' | ':' | '-' | EM_DASH | EN_DASH => PunctuationType::Other,
        _ => return (token, PunctuationType::None),
    };

    (&token[..idx], kind)
}

/// ORP position for a word of `len` characters.
pub fn orp_index_for_len(len: usize) -> usize {
    match len {
        0..=3 => 0,
        4..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => len / 3,
    }
}
