//! Shared text shaping and number formatting for compact UI surfaces.

use alloc::string::String;

pub const COMPACT_MAX_WORDS: usize = 7;
pub const COMPACT_MAX_CHARS: usize = 34;
const ELLIPSIS: &str = "...";

/// One-line teaser of `source`: at most [`COMPACT_MAX_WORDS`] words and
/// [`COMPACT_MAX_CHARS`] characters, whitespace collapsed, `...` when cut.
pub fn preview_compact(source: &str) -> String {
    let mut out = String::new();
    let mut chars = 0usize;

    for (index, word) in source.split_whitespace().enumerate() {
        if index == COMPACT_MAX_WORDS {
            out.push_str(ELLIPSIS);
            return out;
        }
        if index > 0 {
            if chars >= COMPACT_MAX_CHARS {
                out.push_str(ELLIPSIS);
                return out;
            }
            out.push(' ');
            chars += 1;
        }
        for ch in word.chars() {
            if chars >= COMPACT_MAX_CHARS {
                out.push_str(ELLIPSIS);
                return out;
            }
            out.push(ch);
            chars += 1;
        }
    }

    out
}

/// `part / total` as a whole percentage, rounded half up. Zero when empty.
pub fn rounded_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let part = part.min(total) as u64;
    let total = total as u64;
    ((part * 200 + total) / (total * 2)) as u8
}

/// `part / total` as a whole percentage, rounded down. Zero when empty.
pub fn floor_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    ((part.min(total) as u64 * 100) / total as u64) as u8
}
