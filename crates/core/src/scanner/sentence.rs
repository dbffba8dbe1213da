//! Sentence delimiting around a cursor.

/// Characters that end a sentence.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Find the sentence enclosing `cursor` within `line`.
///
/// The sentence starts one past the nearest terminator left of the cursor and
/// ends at the nearest terminator at or right of the cursor; surrounding
/// whitespace is trimmed. Returns the sentence text and its byte offset in
/// `line`, or `None` when the cursor is past the end of the line or not on a
/// character boundary.
pub fn scan_sentence(line: &str, cursor: usize) -> Option<(&str, usize)> {
    if cursor > line.len() || !line.is_char_boundary(cursor) {
        return None;
    }

    // Terminators are ASCII, so +1 always lands on a char boundary.
    let start = line[..cursor].rfind(is_terminator).map_or(0, |i| i + 1);
    let end = line[cursor..].find(is_terminator).map_or(line.len(), |i| cursor + i);

    let raw = &line[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let sentence = raw.trim();

    Some((sentence, start + leading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_sentence_never_crosses_terminator() {
        let line = "See Paris. Visit Rome.";
        let cursor = line.find("Rome").unwrap() + 2;
        let (sentence, offset) = scan_sentence(line, cursor).unwrap();
        assert_eq!(sentence, "Visit Rome");
        assert_eq!(offset, 11);
        assert_eq!(&line[offset..offset + sentence.len()], "Visit Rome");
    }

    #[test]
    fn test_line_without_terminators_is_one_sentence() {
        let line = "  a line with no end  ";
        let (sentence, offset) = scan_sentence(line, 5).unwrap();
        assert_eq!(sentence, "a line with no end");
        assert_eq!(offset, 2);
    }

    #[rstest]
    #[case("I visited Paris.", 15, "I visited Paris", 0)]
    #[case("Wow! Really? Yes.", 8, "Really", 5)]
    #[case("Wow! Really? Yes.", 0, "Wow", 0)]
    #[case("Wow! Really? Yes.", 16, "Yes", 13)]
    #[case("end.", 4, "", 4)]
    #[case("", 0, "", 0)]
    fn test_scan_sentence(
        #[case] line: &str,
        #[case] cursor: usize,
        #[case] expected: &str,
        #[case] offset: usize,
    ) {
        assert_eq!(scan_sentence(line, cursor), Some((expected, offset)));
    }

    #[test]
    fn test_cursor_out_of_bounds() {
        assert_eq!(scan_sentence("short", 6), None);
    }

    #[test]
    fn test_cursor_inside_multibyte_char() {
        // 'é' is two bytes; offset 4 splits it.
        assert_eq!(scan_sentence("café au lait", 4), None);
        assert_eq!(scan_sentence("café au lait", 5), Some(("café au lait", 0)));
    }
}
