use super::types::CompareMode;
use similar::TextDiff;

/// Split text into comparison units for the given mode
pub fn split(text: &str, mode: CompareMode) -> Vec<String> {
    match mode {
        CompareMode::Line => split_lines(text),
        CompareMode::Word => split_words(text),
    }
}

/// Split text into lines, normalizing CRLF to LF.
///
/// A trailing newline does not produce a trailing empty line, and an empty
/// string produces no lines at all.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();

    if normalized.ends_with('\n') {
        lines.pop();
    }

    lines
}

/// Split text into alternating runs of whitespace and non-whitespace.
///
/// Whitespace runs are kept as units of their own so that a whitespace-only
/// edit shows up in the diff.
pub fn split_words(text: &str) -> Vec<String> {
    TextDiff::from_words(text, "")
        .old_slices()
        .iter()
        .map(|word| word.to_string())
        .collect()
}

/// Split text into one unit per character
pub fn split_chars(text: &str) -> Vec<String> {
    TextDiff::from_chars(text, "")
        .old_slices()
        .iter()
        .map(|ch| ch.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
        assert!(split_words("").is_empty());
        assert!(split_chars("").is_empty());
    }

    #[test]
    fn trailing_newline_is_not_a_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn lone_newline_is_one_empty_line() {
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("\n\n"), vec!["", ""]);
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(split_lines("one\r\ntwo\r\n"), vec!["one", "two"]);
        // lone carriage returns stay part of the line
        assert_eq!(split_lines("a\rb"), vec!["a\rb"]);
    }

    #[test]
    fn words_keep_whitespace_units() {
        assert_eq!(
            split_words("hello  world\tagain "),
            vec!["hello", "  ", "world", "\t", "again", " "]
        );
        assert_eq!(split_words("   "), vec!["   "]);
    }

    #[test]
    fn words_reconstruct_input() {
        let text = " 我爱你 and\n  you ";
        assert_eq!(split_words(text).concat(), text);
    }

    #[test]
    fn chars_split_multibyte() {
        assert_eq!(split_chars("我不爱"), vec!["我", "不", "爱"]);
    }

    #[test]
    fn split_dispatches_on_mode() {
        assert_eq!(split("a b\nc", CompareMode::Line), vec!["a b", "c"]);
        assert_eq!(split("a b\nc", CompareMode::Word), vec!["a", " ", "b", "\n", "c"]);
    }
}
