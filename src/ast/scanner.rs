//! Character-level scanners shared by the expression parser.
//!
//! Each scanner takes the input and a cursor, and advances the cursor only
//! when it succeeds. On failure the cursor is left where it was, so the
//! caller can try the next alternative.

pub(crate) fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

pub(crate) fn is_identifier_continue(byte: u8) -> bool {
    is_identifier_start(byte) || byte.is_ascii_digit()
}

pub(crate) fn skip_spaces(input: &str, pos: &mut usize) {
    let bytes = input.as_bytes();
    while bytes.get(*pos).is_some_and(|b| b.is_ascii_whitespace()) {
        *pos += 1;
    }
}

/// Scans a numeric literal: optional single leading `-`, digits, at most one
/// `.`. Leading spaces are skipped only while nothing has been consumed yet.
///
/// Fails unless at least one digit was consumed; a bare `-` is not a literal,
/// however far the cursor moved while scanning it.
pub(crate) fn scan_literal(input: &str, pos: &mut usize) -> Option<f64> {
    let bytes = input.as_bytes();
    let mut idx = *pos;
    let mut seen_dot = false;
    let mut seen_digit = false;
    let mut seen_minus = false;
    let mut number_start = idx;

    while let Some(&byte) = bytes.get(idx) {
        match byte {
            b' ' if !seen_minus && !seen_digit && !seen_dot => {
                idx += 1;
                number_start = idx;
            }
            b'-' if !seen_minus && !seen_digit && !seen_dot => {
                seen_minus = true;
                idx += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                idx += 1;
            }
            b'0'..=b'9' => {
                seen_digit = true;
                idx += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    let value = input[number_start..idx].parse::<f64>().ok()?;
    *pos = idx;
    Some(value)
}

/// Scans an identifier: a letter or `_` first, then letters, `_`, or digits.
pub(crate) fn scan_identifier<'a>(input: &'a str, pos: &mut usize) -> Option<&'a str> {
    let bytes = input.as_bytes();
    let start = *pos;
    let mut idx = start;

    if !bytes.get(idx).copied().is_some_and(is_identifier_start) {
        return None;
    }
    idx += 1;
    while bytes.get(idx).copied().is_some_and(is_identifier_continue) {
        idx += 1;
    }

    *pos = idx;
    Some(&input[start..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(input: &str) -> Option<(f64, usize)> {
        let mut pos = 0;
        scan_literal(input, &mut pos).map(|value| (value, pos))
    }

    #[test]
    fn test_scan_plain_literals() {
        assert_eq!(literal("0"), Some((0.0, 1)));
        assert_eq!(literal("467"), Some((467.0, 3)));
        assert_eq!(literal("122.52123"), Some((122.52123, 9)));
    }

    #[test]
    fn test_scan_signed_literals() {
        assert_eq!(literal("-12.3"), Some((-12.3, 5)));
        assert_eq!(literal("-3"), Some((-3.0, 2)));
    }

    #[test]
    fn test_scan_stops_at_first_invalid_character() {
        assert_eq!(literal("12+3"), Some((12.0, 2)));
        assert_eq!(literal("1.2.3"), Some((1.2, 3)));
    }

    #[test]
    fn test_leading_spaces_skipped_before_sign_only() {
        assert_eq!(literal("  -4"), Some((-4.0, 4)));
        // A space after the sign ends the scan before any digit.
        assert_eq!(literal("- 4"), None);
    }

    #[test]
    fn test_bare_minus_is_not_a_literal() {
        let mut pos = 0;
        assert_eq!(scan_literal("-", &mut pos), None);
        assert_eq!(pos, 0);

        let mut pos = 0;
        assert_eq!(scan_literal("-abc", &mut pos), None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_second_minus_rejected() {
        assert_eq!(literal("--4"), None);
    }

    #[test]
    fn test_scan_identifier_charset() {
        let mut pos = 0;
        assert_eq!(scan_identifier("var_C10 + 1", &mut pos), Some("var_C10"));
        assert_eq!(pos, 7);

        let mut pos = 0;
        assert_eq!(scan_identifier("_x9", &mut pos), Some("_x9"));

        let mut pos = 0;
        assert_eq!(scan_identifier("9lives", &mut pos), None);
        assert_eq!(pos, 0);
    }
}
