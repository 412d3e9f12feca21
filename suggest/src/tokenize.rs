//! Trigger-token extraction from the text preceding the cursor.

/// Comma and period delimiters, ASCII and full-width/ideographic forms.
/// Designers mix romanized input with native-script text, so both must split.
const DELIMITERS: [char; 6] = [',', '.', '，', '．', '、', '。'];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

/// Slice of `text` covering the first `cursor` characters.
///
/// The offset is character-indexed so a cursor landing inside a multi-byte
/// script never panics; out-of-range offsets clamp to the full text.
pub fn text_before_cursor(text: &str, cursor: usize) -> &str {
    match text.char_indices().nth(cursor) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Last token of `text` after splitting on whitespace and comma/period
/// punctuation. Text ending in a delimiter yields an empty token, which the
/// caller treats as "no trigger".
pub fn last_word(text: &str) -> &str {
    text.split(is_delimiter).next_back().unwrap_or("")
}
