/// Whitespace-delimited token count of raw, untokenized text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whole minutes needed to read `word_count` words at `wpm`, rounded up.
pub fn estimate_reading_minutes(word_count: usize, wpm: u16) -> usize {
    word_count.div_ceil(wpm.max(1) as usize)
}

/// Splits text into paragraphs on runs holding two or more newlines.
///
/// Carriage returns inside a newline run are part of the separator, so CRLF
/// text splits the same way as LF text.
pub(super) fn paragraphs(text: &str) -> Paragraphs<'_> {
    Paragraphs { rest: Some(text) }
}

pub(super) struct Paragraphs<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.rest?;
        let bytes = text.as_bytes();
        let mut cursor = 0usize;

        while cursor < bytes.len() {
            if bytes[cursor] != b'\n' && bytes[cursor] != b'\r' {
                cursor += 1;
                continue;
            }

            let run_start = cursor;
            let mut newlines = 0usize;
            while cursor < bytes.len() && (bytes[cursor] == b'\n' || bytes[cursor] == b'\r') {
                if bytes[cursor] == b'\n' {
                    newlines += 1;
                }
                cursor += 1;
            }

            if newlines >= 2 {
                self.rest = Some(&text[cursor..]);
                return Some(&text[..run_start]);
            }
        }

        self.rest = None;
        Some(text)
    }
}
