use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

pub fn at(index: usize, text: &str) -> &str {
    get(index, text).unwrap_or_default()
}

pub fn get(index: usize, text: &str) -> Option<&str> {
    text.get(index..)?.graphemes(true).next()
}

pub fn next(index: usize, text: &str) -> usize {
    index + at(index, text).len().max(1)
}

pub fn is_boundary(index: usize, text: &str) -> bool {
    text.is_char_boundary(index)
        && GraphemeCursor::new(index, text.len(), true)
            .is_boundary(text, 0)
            .unwrap_or(false)
}

pub fn is_line_end(index: usize, text: &str) -> bool {
    match get(index, text) {
        Some(grapheme) => grapheme == "\n" || grapheme == "\r\n",
        None => true,
    }
}

pub fn is_char(grapheme: &str, c: char) -> bool {
    let mut grapheme_char_count = 0;

    for grapheme_c in grapheme.chars() {
        grapheme_char_count += 1;

        if grapheme_char_count > 1 || c != grapheme_c {
            return false;
        }
    }

    grapheme_char_count == 1
}

// Identifier characters: letters, digits and `_`.
pub fn is_word(grapheme: &str) -> bool {
    !grapheme.is_empty() && grapheme.chars().all(|c| c == '_' || c.is_alphanumeric())
}

pub fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(|c| c.is_whitespace())
}
