/// Longest entity body, without `&` and `;`, worth trying to decode.
pub(super) const MAX_ENTITY_LEN: usize = 10;

/// Decodes an entity body such as `amp`, `#39` or `#x2014`.
pub(super) fn decode_entity(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        return decode_numeric(numeric);
    }

    let named = match body.to_ascii_lowercase().as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "lsquo" | "rsquo" => '\'',
        "ldquo" | "rdquo" | "laquo" | "raquo" => '"',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "aacute" => 'á',
        "eacute" => 'é',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "uuml" => 'ü',
        "ouml" => 'ö',
        "auml" => 'ä',
        "szlig" => 'ß',
        "agrave" => 'à',
        "egrave" => 'è',
        "ccedil" => 'ç',
        "iexcl" => '¡',
        "iquest" => '¿',
        _ => return None,
    };
    Some(named)
}

fn decode_numeric(digits: &str) -> Option<char> {
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };

    match value {
        0xA0 => Some(' '),
        _ => char::from_u32(value),
    }
}
