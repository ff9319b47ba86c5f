//! Application configuration for todoexport.
//!
//! User config lives at `~/.todoexport/todoexport.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoExportError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "todoexport.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".todoexport";

/// Header of the row-kind column as Todoist writes it: the file starts with a
/// zero-width no-break space that ends up glued to the first column name.
pub const TODOIST_TYPE_COLUMN: &str = "\u{FEFF}TYPE";

// ---------------------------------------------------------------------------
// Config structs (matching todoexport.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Column names of the export file.
    #[serde(default)]
    pub columns: ColumnsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Root output directory, relative to the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Labels applied to every document, ahead of `--labels`.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            labels: Vec::new(),
        }
    }
}

fn default_output_dir() -> String {
    "output".into()
}

/// `[columns]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Row-kind marker column, matched byte for byte.
    #[serde(default = "default_type_column")]
    pub type_column: String,

    /// Task title / note text.
    #[serde(default = "default_content_column")]
    pub content: String,

    /// Task description.
    #[serde(default = "default_description_column")]
    pub description: String,

    /// Note date.
    #[serde(default = "default_date_column")]
    pub date: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            type_column: default_type_column(),
            content: default_content_column(),
            description: default_description_column(),
            date: default_date_column(),
        }
    }
}

fn default_type_column() -> String {
    TODOIST_TYPE_COLUMN.into()
}
fn default_content_column() -> String {
    "CONTENT".into()
}
fn default_description_column() -> String {
    "DESCRIPTION".into()
}
fn default_date_column() -> String {
    "DATE".into()
}

// ---------------------------------------------------------------------------
// Export config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime export configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Path of the CSV export to convert.
    pub input: PathBuf,
    /// Root output directory; documents go to `<output_root>/<input stem>/`.
    pub output_root: PathBuf,
    /// Extra labels applied to every document, in order.
    pub labels: Vec<String>,
    /// Column names of the export.
    pub columns: ColumnsConfig,
}

impl ExportConfig {
    /// Merge the config file with CLI values. `out` overrides
    /// `defaults.output_dir`; `labels` are appended to `defaults.labels`.
    pub fn from_app(
        config: &AppConfig,
        input: impl Into<PathBuf>,
        out: Option<&str>,
        labels: &[String],
    ) -> Self {
        let mut all_labels = config.defaults.labels.clone();
        all_labels.extend(labels.iter().cloned());

        Self {
            input: input.into(),
            output_root: PathBuf::from(out.unwrap_or(&config.defaults.output_dir)),
            labels: all_labels,
            columns: config.columns.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.todoexport/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TodoExportError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.todoexport/todoexport.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TodoExportError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        TodoExportError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TodoExportError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = render_config(&AppConfig::default())?;

    std::fs::write(&path, content).map_err(|e| TodoExportError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Render a config as pretty TOML.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| TodoExportError::Serialize(e.to_string()))
}
