//! Shared types, error model, and configuration for todoexport.
//!
//! This crate is the foundation depended on by all other todoexport crates.
//! It provides:
//! - [`TodoExportError`], the unified error type
//! - Domain types ([`TaskRecord`], [`Note`], [`Row`], [`RowKind`])
//! - Configuration ([`AppConfig`], [`ExportConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ColumnsConfig, DefaultsConfig, ExportConfig, TODOIST_TYPE_COLUMN, config_dir,
    config_file_path, init_config, load_config, load_config_from, render_config,
};
pub use error::{Result, TodoExportError};
pub use types::{Note, Row, RowKind, TaskRecord};
