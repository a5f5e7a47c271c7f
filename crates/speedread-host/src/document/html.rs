use std::borrow::Cow;

use super::html_entities::{MAX_ENTITY_LEN, decode_entity};

const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "aside",
    "header",
    "footer",
    "nav",
    "li",
    "ul",
    "ol",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "table",
    "tr",
    "td",
    "th",
    "dt",
    "dd",
    "br",
    "hr",
];

/// Which parts of the document are currently being read.
#[derive(Clone, Copy, Debug, Default)]
struct HtmlScope {
    in_head: bool,
    in_body: bool,
    body_seen: bool,
    in_script: bool,
    in_style: bool,
}

impl HtmlScope {
    fn emits_text(self) -> bool {
        if self.in_script || self.in_style {
            return false;
        }
        if self.body_seen {
            return self.in_body;
        }
        !self.in_head
    }

    fn raw_text_close(self) -> Option<&'static str> {
        if self.in_script {
            Some("</script")
        } else if self.in_style {
            Some("</style")
        } else {
            None
        }
    }

    fn apply(&mut self, tag: &TagInfo<'_>) {
        let opens = !tag.is_closing && !tag.is_self_closing;

        if tag.is("head") {
            self.in_head = opens;
        } else if tag.is("body") {
            if tag.is_closing {
                self.in_body = false;
            } else {
                self.body_seen = true;
                self.in_head = false;
                self.in_body = !tag.is_self_closing;
            }
        } else if tag.is("script") {
            self.in_script = opens;
        } else if tag.is("style") {
            self.in_style = opens;
        }
    }
}

struct TagInfo<'a> {
    local_name: &'a str,
    is_closing: bool,
    is_self_closing: bool,
}

impl TagInfo<'_> {
    fn is(&self, name: &str) -> bool {
        self.local_name.eq_ignore_ascii_case(name)
    }

    fn is_block(&self) -> bool {
        BLOCK_TAGS.iter().any(|name| self.is(name))
    }
}

/// Parses the inside of `<...>`. Comments, doctypes and processing
/// instructions yield `None`.
fn parse_tag(raw: &str) -> Option<TagInfo<'_>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with(['!', '?']) {
        return None;
    }

    let (is_closing, rest) = match raw.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, raw),
    };
    let is_self_closing = rest.ends_with('/');

    let name_end = rest
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(rest.len());
    if name_end == 0 {
        return None;
    }

    let name = &rest[..name_end];
    let local_name = name.rsplit(':').next().unwrap_or(name);

    Some(TagInfo {
        local_name,
        is_closing,
        is_self_closing,
    })
}

/// Accumulates text with collapsed whitespace and blank-line paragraph
/// breaks.
#[derive(Default)]
struct TextSink {
    out: String,
    last_was_space: bool,
}

impl TextSink {
    fn push(&mut self, ch: char) {
        if ch.is_whitespace() {
            if self.out.is_empty() || self.last_was_space {
                return;
            }
            self.out.push(' ');
            self.last_was_space = true;
            return;
        }

        self.out.push(ch);
        self.last_was_space = false;
    }

    fn paragraph_break(&mut self) {
        while self.out.ends_with(' ') {
            self.out.pop();
        }
        self.last_was_space = true;

        if self.out.is_empty() || self.out.ends_with('\n') {
            return;
        }
        self.out.push_str("\n\n");
    }

    fn finish(mut self) -> String {
        let trimmed_len = self.out.trim_end().len();
        self.out.truncate(trimmed_len);
        self.out
    }
}

/// Plain text of an HTML or XHTML document.
///
/// Head, script and style content is dropped and block-level tags become
/// paragraph breaks. Inline tags join their neighbours. Input that is not
/// UTF-8 is read as Windows-1252.
pub fn html_to_text(bytes: &[u8]) -> String {
    let source = decode_bytes(bytes);
    let source = source.as_ref();

    let mut scope = HtmlScope::default();
    let mut sink = TextSink::default();
    let mut cursor = 0usize;

    while let Some(ch) = source[cursor..].chars().next() {
        match ch {
            '<' => {
                let rest = &source[cursor + 1..];
                if rest.starts_with("!--") {
                    cursor = match rest.find("-->") {
                        Some(end) => cursor + 1 + end + 3,
                        None => source.len(),
                    };
                    continue;
                }

                let Some(tag_end) = rest.find('>') else {
                    break;
                };
                cursor += 1 + tag_end + 1;

                let Some(tag) = parse_tag(&rest[..tag_end]) else {
                    continue;
                };
                scope.apply(&tag);
                if tag.is_block() && scope.emits_text() {
                    sink.paragraph_break();
                }

                // script and style bodies may contain bare `<`
                if let Some(closing) = scope.raw_text_close() {
                    cursor = find_ignore_case(&source[cursor..], closing)
                        .map_or(source.len(), |offset| cursor + offset);
                }
            }
            '&' => {
                let (decoded, consumed) = read_entity(&source[cursor..]);
                if scope.emits_text() {
                    sink.push(decoded);
                }
                cursor += consumed;
            }
            _ => {
                if scope.emits_text() && (ch.is_whitespace() || !ch.is_control()) {
                    sink.push(ch);
                }
                cursor += ch.len_utf8();
            }
        }
    }

    sink.finish()
}

/// Decodes `&name;` at the start of `input`; a bare `&` stays literal.
pub(super) fn read_entity(input: &str) -> (char, usize) {
    let body = &input[1..];
    let end = body
        .char_indices()
        .take(MAX_ENTITY_LEN + 1)
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '#'))
        .filter(|(_, c)| *c == ';')
        .map(|(idx, _)| idx);

    match end.and_then(|end| decode_entity(&body[..end]).map(|ch| (ch, end))) {
        Some((ch, end)) => (ch, 1 + end + 1),
        None => ('&', 1),
    }
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| windows_1252(b)).collect()),
    }
}

fn windows_1252(byte: u8) -> char {
    match byte {
        0x85 => '\u{2026}',
        0x91 | 0x92 => '\'',
        0x93 | 0x94 => '"',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x80..=0x9F => '?',
        _ => byte as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_with_paragraph_breaks() {
        let html = b"<html><head><title>Ignored</title><style>p{}</style></head>\
            <body><h1>Title</h1><p>First <em>para</em>.</p><p>Second&nbsp;one.</p></body></html>";
        assert_eq!(html_to_text(html), "Title\n\nFirst para.\n\nSecond one.");
    }

    #[test]
    fn scripts_and_comments_are_dropped() {
        let html = b"<body><script>var x = 1 < 2;</script><!-- note <p> -->Visible</body>";
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn fragments_without_body_are_read() {
        assert_eq!(html_to_text(b"one<br/>two &amp; three"), "one\n\ntwo & three");
    }

    #[test]
    fn namespaced_xhtml_tags_count_as_blocks() {
        let xhtml = b"<x:body><x:p>alpha</x:p><x:p>beta</x:p></x:body>";
        assert_eq!(html_to_text(xhtml), "alpha\n\nbeta");
    }

    #[test]
    fn unknown_entities_and_bare_ampersands_stay_literal() {
        assert_eq!(html_to_text(b"A & B &bogus; C"), "A & B &bogus; C");
        assert_eq!(html_to_text(b"wait&mdash;what"), "wait\u{2014}what");
    }

    #[test]
    fn non_utf8_bytes_fall_back_to_windows_1252() {
        assert_eq!(html_to_text(b"caf\xe9 \x93ok\x94"), "caf\u{e9} \"ok\"");
    }

    #[test]
    fn unterminated_tag_ends_the_text() {
        assert_eq!(html_to_text(b"kept <p unfinished"), "kept");
    }
}
