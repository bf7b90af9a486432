//! The transcription pass: prefixed comment lines to Markdown.

use tracing::{debug, instrument, trace};

use transcribe_shared::{
    InputFile, LineEnding, Result, TranscribeError, TranscribeOptions, check_heading_level,
};

use crate::line_ending;
use crate::lines::{Classification, split_lines};
use crate::signature::{format_type, parse_signature};

/// Transcribe the prefixed lines of `files` into one Markdown string.
///
/// Files are processed in order. Headings become linked `<a name href>`
/// headings and prose lines are copied verbatim. A blank line is inserted
/// wherever the recognized lines of a file are not adjacent in the source,
/// and between the sections of consecutive files.
///
/// Fails without producing output if the heading level is out of range, the
/// URL template is missing, or any heading signature is malformed.
#[instrument(skip_all, fields(files = files.len()))]
pub fn transcribe(files: &[InputFile], opts: &TranscribeOptions) -> Result<String> {
    let level = check_heading_level(i64::from(opts.heading_level))?;
    let url = opts
        .url
        .as_deref()
        .ok_or_else(|| TranscribeError::config("URL template not specified"))?;

    let ending = line_ending::detect(files);
    debug!(%ending, "selected line ending");

    let heading = "#".repeat(usize::from(level));
    let mut output = String::new();

    for file in files {
        if !output.is_empty() {
            output.push_str(ending.as_str());
        }
        let emitted = transcribe_file(&mut output, file, &heading, url, opts, ending)?;
        debug!(file = %file.name, emitted, "transcribed file");
    }

    Ok(output)
}

/// Append one file's section to `output`, returning the number of lines
/// emitted.
fn transcribe_file(
    output: &mut String,
    file: &InputFile,
    heading: &str,
    url: &str,
    opts: &TranscribeOptions,
    ending: LineEnding,
) -> Result<usize> {
    let mut prev_line: Option<usize> = None;
    let mut emitted = 0;

    for line in split_lines(&file.text) {
        let rendered = match classify(line.content, opts) {
            Classification::Ignored => continue,
            Classification::Heading(text) => {
                trace!(line = line.number, "heading");
                render_heading(text, heading, url, file, line.number, line.ending)?
            }
            Classification::Body(text) => {
                trace!(line = line.number, "prose");
                format!("{text}{}", line.ending)
            }
        };

        if prev_line.is_some_and(|prev| line.number > prev + 1) {
            output.push_str(ending.as_str());
        }
        output.push_str(&rendered);
        prev_line = Some(line.number);
        emitted += 1;
    }

    Ok(emitted)
}

/// Render a heading line as an anchored Markdown heading.
fn render_heading(
    text: &str,
    heading: &str,
    url: &str,
    file: &InputFile,
    number: usize,
    line_ending: &str,
) -> Result<String> {
    let located = |e| TranscribeError::signature(&file.name, number, e);
    let sig = parse_signature(text).map_err(located)?;
    let ty = format_type(sig.ty).map_err(located)?;
    let href = source_url(url, &file.name, number);

    Ok(format!(
        "{heading} <a name=\"{}\" href=\"{}\">`{} :: {ty}`</a>{line_ending}",
        escape(sig.name),
        escape(&href),
        sig.name,
    ))
}

fn classify<'a>(content: &'a str, opts: &TranscribeOptions) -> Classification<'a> {
    crate::lines::classify(content, &opts.heading_prefix, &opts.prefix)
}

/// Fill the `{filename}` and `{line}` placeholders (first occurrence each).
fn source_url(template: &str, filename: &str, line: usize) -> String {
    template
        .replacen("{filename}", filename, 1)
        .replacen("{line}", &line.to_string(), 1)
}

/// Escape text for use inside a double-quoted HTML attribute.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
