//! todoexport CLI: turn task-manager exports into per-task documents.
//!
//! Splits a Todoist CSV export into one HTML file per task, pulling URLs,
//! ingredient lists and `@labels` out of each title.

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
