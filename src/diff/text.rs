/// Split a text blob into the line array the diff engine works on.
///
/// Empty input yields zero lines. A single trailing newline terminates the
/// last line instead of opening an empty one, and CRLF endings lose their
/// carriage return.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn lone_newline_is_one_empty_line() {
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn blank_lines_in_the_middle_survive() {
        assert_eq!(split_lines("a\n\n\nb"), vec!["a", "", "", "b"]);
    }

    #[test]
    fn crlf_is_stripped() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }
}
