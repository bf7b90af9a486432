//! Configuration for transcribe.
//!
//! Project config lives at `./transcribe.toml` (or the path given with
//! `--config`). CLI flags override config file values, which override
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranscribeError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "transcribe.toml";

pub const DEFAULT_HEADING_LEVEL: u8 = 3;
pub const DEFAULT_HEADING_PREFIX: &str = "//#";
pub const DEFAULT_PREFIX: &str = "//.";

const HEADING_LEVEL_MESSAGE: &str = "Heading level must be an integer in range [1, 6]";

// ---------------------------------------------------------------------------
// File config (matching transcribe.toml schema)
// ---------------------------------------------------------------------------

/// Settings read from `transcribe.toml`. Every field is optional so that a
/// file can set only what it cares about; the CLI builds one of these from
/// its flags too and layers it on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Source URL template with `{filename}` and `{line}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Document to splice the output into instead of printing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_into: Option<PathBuf>,
}

impl FileConfig {
    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn layer(self, over: FileConfig) -> FileConfig {
        FileConfig {
            heading_level: over.heading_level.or(self.heading_level),
            heading_prefix: over.heading_prefix.or(self.heading_prefix),
            prefix: over.prefix.or(self.prefix),
            url: over.url.or(self.url),
            insert_into: over.insert_into.or(self.insert_into),
        }
    }
}

// ---------------------------------------------------------------------------
// Transcription options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Options consumed by the transcription engine.
///
/// `url` stays optional here: the engine itself reports a missing template,
/// so callers that build options by hand get the same error as the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribeOptions {
    /// Markdown heading level, `1..=6`.
    pub heading_level: u8,
    /// Prefix marking heading lines.
    pub heading_prefix: String,
    /// Prefix marking prose lines.
    pub prefix: String,
    /// Source URL template.
    pub url: Option<String>,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            heading_level: DEFAULT_HEADING_LEVEL,
            heading_prefix: DEFAULT_HEADING_PREFIX.into(),
            prefix: DEFAULT_PREFIX.into(),
            url: None,
        }
    }
}

impl TranscribeOptions {
    /// Default options with the given URL template.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

impl TryFrom<&FileConfig> for TranscribeOptions {
    type Error = TranscribeError;

    fn try_from(config: &FileConfig) -> Result<Self> {
        let heading_level = match config.heading_level {
            Some(level) => check_heading_level(level)?,
            None => DEFAULT_HEADING_LEVEL,
        };
        Ok(Self {
            heading_level,
            heading_prefix: config
                .heading_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADING_PREFIX.into()),
            prefix: config
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.into()),
            url: config.url.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Heading level validation
// ---------------------------------------------------------------------------

/// Check that `level` lies in `[1, 6]`.
pub fn check_heading_level(level: i64) -> Result<u8> {
    match u8::try_from(level) {
        Ok(level @ 1..=6) => Ok(level),
        _ => Err(TranscribeError::range(HEADING_LEVEL_MESSAGE)),
    }
}

/// Parse a heading level given as text (e.g. a CLI flag).
///
/// Integral decimals such as `"2.0"` are accepted; anything else that is
/// not an integer is a range error, as is an integer outside `[1, 6]`.
pub fn parse_heading_level(raw: &str) -> Result<u8> {
    let raw = raw.trim();
    let level = match raw.parse::<i64>() {
        Ok(level) => level,
        Err(_) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => value as i64,
            _ => return Err(TranscribeError::range(HEADING_LEVEL_MESSAGE)),
        },
    };
    check_heading_level(level)
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the config file.
///
/// With an explicit path the file must exist. Otherwise `./transcribe.toml`
/// is used when present, and defaults when it is not.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let path = Path::new(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(FileConfig::default());
    }

    load_config_from(path)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TranscribeError::io(path, e))?;

    let config = toml::from_str(&content).map_err(|e| {
        TranscribeError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(?path, "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = TranscribeOptions::default();
        assert_eq!(opts.heading_level, 3);
        assert_eq!(opts.heading_prefix, "//#");
        assert_eq!(opts.prefix, "//.");
        assert!(opts.url.is_none());
    }

    #[test]
    fn config_parses_all_fields() {
        let toml_str = r#"
heading_level = 2
heading_prefix = "--#"
prefix = "--."
url = "https://example.com/{filename}#L{line}"
insert_into = "README.md"
"#;
        let config: FileConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.heading_level, Some(2));
        assert_eq!(config.heading_prefix.as_deref(), Some("--#"));
        assert_eq!(config.insert_into, Some(PathBuf::from("README.md")));

        let opts = TranscribeOptions::try_from(&config).expect("valid");
        assert_eq!(opts.heading_level, 2);
        assert_eq!(opts.prefix, "--.");
        assert_eq!(
            opts.url.as_deref(),
            Some("https://example.com/{filename}#L{line}")
        );
    }

    #[test]
    fn config_rejects_unknown_fields() {
        assert!(toml::from_str::<FileConfig>("headingLevel = 2").is_err());
    }

    #[test]
    fn config_roundtrip() {
        let config = FileConfig {
            heading_level: Some(4),
            url: Some("u/{filename}".into()),
            ..FileConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        assert!(!toml_str.contains("prefix"));
        let parsed: FileConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn layer_prefers_overrides() {
        let file = FileConfig {
            heading_level: Some(2),
            prefix: Some("#.".into()),
            url: Some("file-url".into()),
            ..FileConfig::default()
        };
        let flags = FileConfig {
            url: Some("flag-url".into()),
            ..FileConfig::default()
        };
        let merged = file.layer(flags);
        assert_eq!(merged.heading_level, Some(2));
        assert_eq!(merged.prefix.as_deref(), Some("#."));
        assert_eq!(merged.url.as_deref(), Some("flag-url"));
    }

    #[test]
    fn out_of_range_level_in_config_is_range_error() {
        let config = FileConfig {
            heading_level: Some(7),
            ..FileConfig::default()
        };
        let err = TranscribeOptions::try_from(&config).unwrap_err();
        assert!(matches!(err, TranscribeError::Range { .. }));
    }

    #[test]
    fn parse_heading_level_accepts_integers() {
        assert_eq!(parse_heading_level("1").unwrap(), 1);
        assert_eq!(parse_heading_level(" 6 ").unwrap(), 6);
        assert_eq!(parse_heading_level("2.0").unwrap(), 2);
    }

    #[test]
    fn parse_heading_level_rejects_everything_else() {
        for raw in ["0", "7", "-1", "2.5", "three", "", "NaN", "inf"] {
            let err = parse_heading_level(raw).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Heading level must be an integer in range [1, 6]",
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn missing_explicit_config_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/transcribe.toml"))).unwrap_err();
        assert!(matches!(err, TranscribeError::Io { .. }));
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = std::env::temp_dir().join(format!("transcribe-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "heading_level = \"three\"").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, TranscribeError::Config { .. }));
        assert!(err.to_string().contains("failed to parse"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
