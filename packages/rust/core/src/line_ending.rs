//! Predominant line-ending detection.

use std::sync::LazyLock;

use regex::Regex;

use transcribe_shared::{InputFile, LineEnding};

/// Count `\r\n` and bare `\n` across all files and pick the more common one.
///
/// `\r\n` wins only with a strict majority; ties (including no line endings
/// at all) resolve to `\n`.
pub fn detect(files: &[InputFile]) -> LineEnding {
    static ENDING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\r\n|\n").expect("valid regex"));

    let (mut lf, mut crlf) = (0usize, 0usize);
    for file in files {
        for m in ENDING_RE.find_iter(&file.text) {
            if m.as_str() == "\r\n" {
                crlf += 1;
            } else {
                lf += 1;
            }
        }
    }

    if crlf > lf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}
