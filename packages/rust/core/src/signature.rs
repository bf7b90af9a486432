//! `name :: type` signatures and line-wrap control for rendered types.
//!
//! Rendered types must only wrap at top-level arrows. Spaces inside
//! parenthesized groups, and spaces inside the pieces between top-level
//! arrows, become non-breaking spaces. Every `->` gets a word joiner between
//! its two characters so it can never be split across lines.

use transcribe_shared::SignatureError;

const SEPARATOR: &str = " :: ";
const CONSTRAINT_ARROW: &str = " => ";
const FUNCTION_ARROW: &str = " -> ";

const NBSP: &str = "\u{A0}";
const JOINED_ARROW: &str = "-\u{2060}>";

/// A heading's signature, split at the first `" :: "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    pub name: &'a str,
    pub ty: &'a str,
}

/// Split a heading's text into name and type.
pub fn parse_signature(text: &str) -> Result<Signature<'_>, SignatureError> {
    text.split_once(SEPARATOR)
        .map(|(name, ty)| Signature { name, ty })
        .ok_or(SignatureError::MissingSeparator)
}

/// Render a type with non-breaking spaces and word-joined arrows.
pub fn format_type(ty: &str) -> Result<String, SignatureError> {
    let segments = ty
        .split(CONSTRAINT_ARROW)
        .map(format_segment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(segments.join(CONSTRAINT_ARROW).replace("->", JOINED_ARROW))
}

/// Format one `" => "`-delimited segment.
fn format_segment(segment: &str) -> Result<String, SignatureError> {
    let mut out = String::with_capacity(segment.len());
    let mut run = String::new();
    let mut group = String::new();
    let mut depth = 0usize;

    for c in segment.chars() {
        match c {
            '(' => {
                if depth == 0 {
                    out.push_str(&unparenthesized(&run));
                    run.clear();
                }
                depth += 1;
                group.push(c);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SignatureError::UnbalancedParens)?;
                group.push(c);
                if depth == 0 {
                    out.push_str(&group.replace(' ', NBSP));
                    group.clear();
                }
            }
            _ if depth > 0 => group.push(c),
            _ => run.push(c),
        }
    }

    if depth != 0 {
        return Err(SignatureError::UnbalancedParens);
    }
    out.push_str(&unparenthesized(&run));
    Ok(out)
}

/// Keep ordinary spaces around top-level arrows only.
fn unparenthesized(run: &str) -> String {
    run.split(FUNCTION_ARROW)
        .map(|piece| piece.replace(' ', NBSP))
        .collect::<Vec<_>>()
        .join(FUNCTION_ARROW)
}
