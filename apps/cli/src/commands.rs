//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use todoexport_core::export::{ExportResult, ProgressReporter};
use todoexport_shared::{ExportConfig, init_config, load_config, render_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// todoexport: split task exports into formatted documents.
#[derive(Parser)]
#[command(
    name = "todoexport",
    version,
    about = "Split task-manager CSV exports into one formatted document per task.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract Todoist CSV to individual formatted files.
    Todoist {
        /// Path to the exported CSV file.
        file: PathBuf,

        /// Labels to apply to everything exported (repeatable).
        #[arg(short, long)]
        labels: Vec<String>,

        /// Root output directory (defaults to ./output).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "todoexport=info",
        1 => "todoexport=debug",
        _ => "todoexport=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Todoist { file, labels, out } => cmd_todoist(&file, &labels, out.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_todoist(file: &Path, labels: &[String], out: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let export_config = ExportConfig::from_app(&config, file, out, labels);

    info!(
        file = %file.display(),
        labels = ?export_config.labels,
        "exporting todoist tasks"
    );

    let reporter = CliProgress::new();
    let result = todoexport_core::export::export(&export_config, &reporter).await?;

    println!();
    println!("  Export complete!");
    println!("  Tasks:  {}", result.record_count);
    println!("  Files:  {}", result.written.len());
    println!("  Path:   {}", result.output_dir.display());
    println!(
        "  Time:   {:.1}s",
        result.elapsed.as_secs_f64()
    );
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config written to {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    print!("{}", render_config(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn record_written(&self, title: &str, _path: &Path, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
        self.bar.set_message(title.to_string());
    }

    fn done(&self, _result: &ExportResult) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_todoist_with_repeated_labels() {
        let cli = Cli::try_parse_from([
            "todoexport", "todoist", "tasks.csv", "-l", "meal", "--labels", "recipe",
        ])
        .unwrap();

        match cli.command {
            Command::Todoist { file, labels, out } => {
                assert_eq!(file, PathBuf::from("tasks.csv"));
                assert_eq!(labels, vec!["meal", "recipe"]);
                assert!(out.is_none());
            }
            _ => panic!("expected todoist command"),
        }
    }

    #[test]
    fn labels_default_to_empty() {
        let cli = Cli::try_parse_from(["todoexport", "todoist", "tasks.csv"]).unwrap();
        match cli.command {
            Command::Todoist { labels, .. } => assert!(labels.is_empty()),
            _ => panic!("expected todoist command"),
        }
    }

    #[test]
    fn todoist_requires_file() {
        assert!(Cli::try_parse_from(["todoexport", "todoist"]).is_err());
    }
}
