//! Shared types, error model, and configuration for transcribe.
//!
//! This crate is the foundation depended on by the other transcribe crates.
//! It provides:
//! - [`TranscribeError`], the unified error type
//! - Domain types ([`InputFile`], [`LineEnding`])
//! - Configuration ([`TranscribeOptions`], [`FileConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, DEFAULT_HEADING_LEVEL, DEFAULT_HEADING_PREFIX, DEFAULT_PREFIX, FileConfig,
    TranscribeOptions, check_heading_level, load_config, load_config_from, parse_heading_level,
};
pub use error::{Result, SignatureError, TranscribeError};
pub use types::{InputFile, LineEnding};
