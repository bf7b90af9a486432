//! CLI definition, config layering, file I/O, and tracing setup.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::io::AsyncWriteExt;
use tracing::info;

use transcribe_core::insert::{CLOSING_MARKER, OPENING_MARKER};
use transcribe_shared::{
    FileConfig, InputFile, TranscribeError, TranscribeOptions, load_config, parse_heading_level,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Render `//#` heading lines and `//.` prose lines from source files as Markdown.
#[derive(Parser)]
#[command(name = "transcribe", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Source files, in output order.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Heading level in range [1, 6] (default: 3).
    #[arg(long, value_name = "NUM", allow_hyphen_values = true)]
    pub heading_level: Option<String>,

    /// Prefix for heading lines (default: "//#").
    #[arg(long, value_name = "STR")]
    pub heading_prefix: Option<String>,

    /// Prefix for non-heading lines (default: "//.").
    #[arg(long, value_name = "STR")]
    pub prefix: Option<String>,

    /// Source URL with {filename} and {line} placeholders.
    #[arg(long, value_name = "STR")]
    pub url: Option<String>,

    /// Insert the output between <!--transcribe--> and <!--/transcribe--> in FILE.
    #[arg(long, value_name = "FILE")]
    pub insert_into: Option<PathBuf>,

    /// Config file (default: ./transcribe.toml if present).
    #[arg(long, value_name = "FILE", env = "TRANSCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub show_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Config layer built from the command-line flags.
    fn flag_config(&self) -> Result<FileConfig> {
        let heading_level = match &self.heading_level {
            Some(raw) => Some(i64::from(parse_heading_level(raw)?)),
            None => None,
        };
        Ok(FileConfig {
            heading_level,
            heading_prefix: self.heading_prefix.clone(),
            prefix: self.prefix.clone(),
            url: self.url.clone(),
            insert_into: self.insert_into.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is
/// reserved for the transcription.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "transcribe=warn",
        1 => "transcribe=info",
        2 => "transcribe=debug",
        _ => "transcribe=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?.layer(cli.flag_config()?);

    if cli.show_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let opts = TranscribeOptions::try_from(&config)?;
    let files = read_files(&cli.files).await?;
    let output = transcribe_core::transcribe(&files, &opts)?;
    info!(
        files = files.len(),
        bytes = output.len(),
        "transcription complete"
    );

    match &config.insert_into {
        Some(target) => insert_into(target, &output).await,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}

/// Read all files concurrently, preserving command-line order.
async fn read_files(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            tokio::spawn(async move {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| TranscribeError::io(&path, e))?;
                Ok::<_, TranscribeError>(InputFile::new(path.to_string_lossy(), text))
            })
        })
        .collect();

    let mut files = Vec::with_capacity(handles.len());
    for handle in handles {
        files.push(handle.await??);
    }
    Ok(files)
}

/// Splice `output` into `target` between the transcribe markers.
async fn insert_into(target: &Path, output: &str) -> Result<()> {
    let document = tokio::fs::read_to_string(target)
        .await
        .map_err(|e| TranscribeError::io(target, e))?;

    let spliced = match transcribe_core::insert_between_markers(&document, output) {
        Ok(spliced) => spliced,
        Err(TranscribeError::Marker { .. }) => {
            return Err(eyre!(
                "{} does not contain {OPENING_MARKER}...{CLOSING_MARKER}",
                target.display()
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tokio::fs::write(target, spliced)
        .await
        .map_err(|e| TranscribeError::io(target, e))?;
    info!(target = %target.display(), "updated document");
    Ok(())
}
