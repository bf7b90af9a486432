//! transcribe CLI: render prefixed source comments as Markdown.
//!
//! Reads the given source files, transcribes their `//#` and `//.` lines,
//! and prints the result or splices it into a document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
