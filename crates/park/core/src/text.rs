//! Formatting control codes embedded in display text.
//!
//! Text colours are encoded as a single control codepoint at the head of a
//! string. Codepoints `0x8E..=0x9B` select the fourteen text colours in
//! palette order.

/// First colour control codepoint (text colour 0).
pub const FORMAT_COLOUR_CODE_START: char = '\u{8E}';
/// Last colour control codepoint (text colour 13).
pub const FORMAT_COLOUR_CODE_END: char = '\u{9B}';

const FORMAT_COLOUR_CODES: [char; 14] = [
    '\u{8E}', '\u{8F}', '\u{90}', '\u{91}', '\u{92}', '\u{93}', '\u{94}', '\u{95}', '\u{96}',
    '\u{97}', '\u{98}', '\u{99}', '\u{9A}', '\u{9B}',
];

/// Returns the control codepoint selecting `text_colour`.
pub fn colour_code(text_colour: u8) -> Option<char> {
    FORMAT_COLOUR_CODES.get(usize::from(text_colour)).copied()
}

pub fn is_colour_code(c: char) -> bool {
    (FORMAT_COLOUR_CODE_START..=FORMAT_COLOUR_CODE_END).contains(&c)
}

/// Returns the text colour selected at the head of `text`, if any.
pub fn leading_colour(text: &str) -> Option<u8> {
    let first = text.chars().next()?;
    FORMAT_COLOUR_CODES
        .iter()
        .position(|&code| code == first)
        .map(|index| index as u8)
}

/// Returns `text` with its leading colour code set to `code`.
///
/// An existing leading colour code is replaced in place; otherwise `code` is
/// inserted at the head.
pub fn with_leading_colour(text: &str, code: char) -> String {
    let mut chars = text.chars();
    let rest = match chars.next() {
        Some(first) if is_colour_code(first) => chars.as_str(),
        _ => text,
    };

    let mut out = String::with_capacity(rest.len() + code.len_utf8());
    out.push(code);
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_code_bounds() {
        assert_eq!(colour_code(0), Some(FORMAT_COLOUR_CODE_START));
        assert_eq!(colour_code(13), Some(FORMAT_COLOUR_CODE_END));
        assert_eq!(colour_code(14), None);
    }

    #[test]
    fn test_replaces_existing_code() {
        let red = colour_code(3).unwrap();
        let blue = colour_code(7).unwrap();
        let text = format!("{red}Exit");

        let updated = with_leading_colour(&text, blue);
        assert_eq!(updated, format!("{blue}Exit"));
        assert_eq!(updated.len(), text.len());
        assert_eq!(leading_colour(&updated), Some(7));
    }

    #[test]
    fn test_inserts_missing_code() {
        let code = colour_code(1).unwrap();
        let updated = with_leading_colour("Toilets", code);

        assert_eq!(updated.chars().count(), "Toilets".chars().count() + 1);
        assert_eq!(updated.len(), "Toilets".len() + code.len_utf8());
        assert!(updated.ends_with("Toilets"));
    }

    #[test]
    fn test_empty_text() {
        let code = colour_code(0).unwrap();
        assert_eq!(with_leading_colour("", code), code.to_string());
        assert_eq!(leading_colour(""), None);
    }
}
