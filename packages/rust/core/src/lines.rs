//! Physical line splitting and prefix classification.

/// One physical line of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// 1-based line number within the file.
    pub number: usize,
    /// Line content with its leading run of ASCII spaces removed.
    pub content: &'a str,
    /// `"\n"`, `"\r\n"`, or `""` for an unterminated line (or one ended by a
    /// lone `\r`, `U+2028` or `U+2029`, which is dropped).
    pub ending: &'a str,
}

/// Iterator over the [`LineRecord`]s of a text.
///
/// Every text yields at least one line. A text that is empty or ends with a
/// terminator yields a trailing empty line.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    text: &'a str,
    pos: usize,
    number: usize,
    done: bool,
}

/// Split `text` into physical lines.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines {
        text,
        pos: 0,
        number: 0,
        done: false,
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.number += 1;

        let text = self.text;
        let rest = &text[self.pos..];
        let body = rest.trim_start_matches(' ');
        let indent = rest.len() - body.len();

        let Some(end) = body.find(is_terminator) else {
            self.done = true;
            return Some(LineRecord {
                number: self.number,
                content: body,
                ending: "",
            });
        };

        let tail = &body[end..];
        let (ending, consumed) = if tail.starts_with("\r\n") {
            ("\r\n", 2)
        } else if tail.starts_with('\n') {
            ("\n", 1)
        } else {
            // lone terminator: ends the line but is not kept
            let len = tail.chars().next().map_or(1, char::len_utf8);
            ("", len)
        };
        self.pos += indent + end + consumed;

        Some(LineRecord {
            number: self.number,
            content: &body[..end],
            ending,
        })
    }
}

/// How a line takes part in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Heading line; holds the text after the heading prefix.
    Heading(&'a str),
    /// Prose line; holds the text after the prose prefix.
    Body(&'a str),
    Ignored,
}

/// Remove `prefix` and at most one following space.
pub fn strip_prefix<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Classify a line's content. The heading prefix is tested first.
pub fn classify<'a>(content: &'a str, heading_prefix: &str, prefix: &str) -> Classification<'a> {
    if let Some(rest) = strip_prefix(content, heading_prefix) {
        Classification::Heading(rest)
    } else if let Some(rest) = strip_prefix(content, prefix) {
        Classification::Body(rest)
    } else {
        Classification::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<(usize, &str, &str)> {
        split_lines(text)
            .map(|r| (r.number, r.content, r.ending))
            .collect()
    }

    #[test]
    fn splits_unix_lines_with_trailing_empty_line() {
        assert_eq!(
            records("a\nb\n"),
            vec![(1, "a", "\n"), (2, "b", "\n"), (3, "", "")]
        );
    }

    #[test]
    fn keeps_final_unterminated_line() {
        assert_eq!(records("a\r\nb"), vec![(1, "a", "\r\n"), (2, "b", "")]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(records(""), vec![(1, "", "")]);
    }

    #[test]
    fn strips_leading_spaces_only() {
        assert_eq!(
            records("   //. x\n\t//. y"),
            vec![(1, "//. x", "\n"), (2, "\t//. y", "")]
        );
    }

    #[test]
    fn lone_carriage_return_ends_line_without_ending() {
        assert_eq!(
            records("a\rb\n"),
            vec![(1, "a", ""), (2, "b", "\n"), (3, "", "")]
        );
    }

    #[test]
    fn unicode_line_separator_ends_line() {
        assert_eq!(records("a\u{2028}b"), vec![(1, "a", ""), (2, "b", "")]);
    }

    #[test]
    fn blank_lines_are_counted() {
        let numbers: Vec<usize> = split_lines("\n\n//. x\n").map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn strip_prefix_removes_one_space() {
        assert_eq!(strip_prefix("//. hello", "//."), Some("hello"));
        assert_eq!(strip_prefix("//.  indented", "//."), Some(" indented"));
        assert_eq!(strip_prefix("//.", "//."), Some(""));
        assert_eq!(strip_prefix("//.x", "//."), Some("x"));
        assert_eq!(strip_prefix("// x", "//."), None);
    }

    #[test]
    fn classify_prefers_heading_prefix() {
        assert_eq!(
            classify("//# f :: a", "//#", "//."),
            Classification::Heading("f :: a")
        );
        assert_eq!(classify("//. text", "//#", "//."), Classification::Body("text"));
        assert_eq!(classify("const x = 1;", "//#", "//."), Classification::Ignored);
        // overlapping prefixes: the heading prefix is checked first
        assert_eq!(classify("//.# h", "//.#", "//."), Classification::Heading("h"));
    }
}
