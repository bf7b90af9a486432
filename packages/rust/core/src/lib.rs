//! Transcription engine for transcribe.
//!
//! Turns `//#` heading lines and `//.` prose lines found in source files into
//! a single Markdown document, and splices that document into an existing
//! file between `<!--transcribe-->` markers.

pub mod engine;
pub mod insert;
pub mod line_ending;
pub mod lines;
pub mod signature;

pub use engine::transcribe;
pub use insert::insert_between_markers;
