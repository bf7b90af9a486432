//! Splicing output into a host document between marker comments.

use tracing::{debug, instrument};

use transcribe_shared::{Result, TranscribeError};

pub const OPENING_MARKER: &str = "<!--transcribe-->";
pub const CLOSING_MARKER: &str = "<!--/transcribe-->";

/// Replace whatever lies between the markers in `document` with `output`.
///
/// The markers and everything outside them are kept. The new content is
/// `"\n\n" + output + "\n"`. The closing marker is searched for only after
/// the first opening marker.
#[instrument(skip_all, fields(document_len = document.len(), output_len = output.len()))]
pub fn insert_between_markers(document: &str, output: &str) -> Result<String> {
    let Some((from, to)) = find_markers(document) else {
        return Err(TranscribeError::marker(format!(
            "document does not contain {OPENING_MARKER}...{CLOSING_MARKER}"
        )));
    };
    debug!(replaced = to - from, "found insertion markers");

    let mut spliced = String::with_capacity(from + output.len() + document.len() - to + 3);
    spliced.push_str(&document[..from]);
    spliced.push_str("\n\n");
    spliced.push_str(output);
    spliced.push('\n');
    spliced.push_str(&document[to..]);
    Ok(spliced)
}

/// Byte range strictly between the opening and closing markers.
fn find_markers(document: &str) -> Option<(usize, usize)> {
    let from = document.find(OPENING_MARKER)? + OPENING_MARKER.len();
    let to = from + document[from..].find(CLOSING_MARKER)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_content_between_markers() {
        let doc = "# API\n\n<!--transcribe-->\nstale\n<!--/transcribe-->\n\nFooter\n";
        let out = insert_between_markers(doc, "fresh\n").unwrap();
        assert_eq!(
            out,
            "# API\n\n<!--transcribe-->\n\nfresh\n\n<!--/transcribe-->\n\nFooter\n"
        );
    }

    #[test]
    fn works_with_adjacent_markers() {
        let out = insert_between_markers("<!--transcribe--><!--/transcribe-->", "x").unwrap();
        assert_eq!(out, "<!--transcribe-->\n\nx\n<!--/transcribe-->");
    }

    #[test]
    fn empty_output_still_inserts_spacing() {
        let out = insert_between_markers("<!--transcribe-->old<!--/transcribe-->", "").unwrap();
        assert_eq!(out, "<!--transcribe-->\n\n\n<!--/transcribe-->");
    }

    #[test]
    fn only_first_marker_pair_is_replaced() {
        let doc = "<!--transcribe-->a<!--/transcribe-->b<!--transcribe-->c<!--/transcribe-->";
        let out = insert_between_markers(doc, "X").unwrap();
        assert_eq!(
            out,
            "<!--transcribe-->\n\nX\n<!--/transcribe-->b<!--transcribe-->c<!--/transcribe-->"
        );
    }

    #[test]
    fn missing_opening_marker_fails() {
        let err = insert_between_markers("text <!--/transcribe-->", "x").unwrap_err();
        assert!(matches!(err, TranscribeError::Marker { .. }));
        assert!(err.to_string().contains("<!--transcribe-->...<!--/transcribe-->"));
    }

    #[test]
    fn closing_marker_before_opening_is_not_used() {
        let err =
            insert_between_markers("<!--/transcribe--> then <!--transcribe-->", "x").unwrap_err();
        assert!(matches!(err, TranscribeError::Marker { .. }));
    }
}
