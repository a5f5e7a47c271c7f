use super::html::read_entity;

/// Plain text of a Markdown document.
///
/// Block markers (headings, quotes, list bullets, rules, code fences) and
/// inline markup (emphasis, code ticks, links, images, HTML tags) are removed.
/// Blank lines and headings delimit paragraphs, which are separated by a
/// blank line in the output.
pub fn markdown_to_text(source: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_fence = false;

    for line in source.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            flush_paragraph(&mut current, &mut paragraphs);
            in_fence = !in_fence;
            continue;
        }

        if in_fence {
            push_line(&mut current, trimmed);
            continue;
        }

        if trimmed.is_empty() || is_thematic_break(trimmed) || is_table_rule(trimmed) {
            flush_paragraph(&mut current, &mut paragraphs);
            continue;
        }

        let row;
        let line = if trimmed.starts_with('|') {
            row = trimmed.replace('|', " ");
            row.trim()
        } else {
            trimmed
        };

        let (block, is_heading) = strip_block_markers(line);
        let text = strip_inline(block);
        if is_heading {
            flush_paragraph(&mut current, &mut paragraphs);
            push_line(&mut current, &text);
            flush_paragraph(&mut current, &mut paragraphs);
        } else {
            push_line(&mut current, &text);
        }
    }
    flush_paragraph(&mut current, &mut paragraphs);

    paragraphs.join("\n\n")
}

fn push_line(current: &mut String, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(text);
}

fn flush_paragraph(current: &mut String, paragraphs: &mut Vec<String>) {
    let collapsed = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        paragraphs.push(collapsed);
    }
    current.clear();
}

fn is_thematic_break(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.chars().all(|c| c == *marker))
}

fn is_table_rule(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Strips leading quote, heading and list markers. Returns the remaining
/// text and whether the line was a heading.
fn strip_block_markers(mut line: &str) -> (&str, bool) {
    while let Some(rest) = line.strip_prefix('>') {
        line = rest.trim_start();
    }

    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return (rest.trim().trim_end_matches('#').trim_end(), true);
        }
    }

    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return (strip_task_box(rest.trim_start()), false);
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && digits <= 9 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return (rest.trim_start(), false);
        }
    }

    (line, false)
}

fn strip_task_box(line: &str) -> &str {
    ["[ ] ", "[x] ", "[X] "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .unwrap_or(line)
}

/// Removes inline markup, keeping the readable text.
fn strip_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let (offset, ch) = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|(_, c)| *c);

        match ch {
            '\\' if next.is_some_and(|c| c.is_ascii_punctuation()) => {
                out.push(next.unwrap_or_default());
                i += 2;
                continue;
            }
            '!' if next == Some('[') => {
                if let Some((label, consumed)) = link_label(&text[offset + 1..]) {
                    out.push_str(&strip_inline(label));
                    i += count_chars(&text[offset..offset + 1 + consumed]);
                    continue;
                }
                out.push(ch);
            }
            '[' => {
                if let Some((label, consumed)) = link_label(&text[offset..]) {
                    out.push_str(&strip_inline(label));
                    i += count_chars(&text[offset..offset + consumed]);
                    continue;
                }
                out.push(ch);
            }
            '<' => {
                if let Some(end) = text[offset..].find('>') {
                    let inner = &text[offset + 1..offset + end];
                    if inner.contains("://") || (inner.contains('@') && !inner.contains(' ')) {
                        out.push_str(inner);
                        i += count_chars(&text[offset..offset + end + 1]);
                        continue;
                    }
                    if inner.starts_with(|c: char| c.is_ascii_alphabetic() || c == '/' || c == '!') {
                        i += count_chars(&text[offset..offset + end + 1]);
                        continue;
                    }
                }
                out.push(ch);
            }
            '&' => {
                let (decoded, consumed) = read_entity(&text[offset..]);
                out.push(decoded);
                i += count_chars(&text[offset..offset + consumed]);
                continue;
            }
            '`' => {}
            '*' => {
                let flanked = prev.is_some_and(|c| !c.is_whitespace())
                    || next.is_some_and(|c| !c.is_whitespace());
                if !flanked {
                    out.push(ch);
                }
            }
            '~' if prev == Some('~') || next == Some('~') => {}
            '_' => {
                let inside_word = prev.is_some_and(char::is_alphanumeric)
                    && next.is_some_and(char::is_alphanumeric);
                if inside_word {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
        i += 1;
    }

    out
}

/// Parses `[label](target)` or `[label][ref]` at the start of `text`.
/// Returns the label and the byte length of the whole construct.
fn link_label(text: &str) -> Option<(&str, usize)> {
    let mut depth = 0usize;
    let mut label_end = None;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    label_end = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }

    let label_end = label_end?;
    let label = &text[1..label_end];
    let after = &text[label_end + 1..];

    let close = match after.chars().next()? {
        '(' => ')',
        '[' => ']',
        _ => return None,
    };
    let target_len = after.find(close)?;
    Some((label, label_end + 1 + target_len + 1))
}

fn count_chars(text: &str) -> usize {
    text.chars().count()
}
