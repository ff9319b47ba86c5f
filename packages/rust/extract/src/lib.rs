//! Title extraction and document rendering for exported tasks.
//!
//! Pulls embedded metadata out of a free-text task title, then renders the
//! task as a small HTML document. Everything here is pure: no filesystem,
//! no clock, no global state.

mod passes;
mod render;

use tracing::{debug, instrument};

use todoexport_shared::TaskRecord;

pub use passes::{PLACEHOLDER_TITLE, TitleParts};
pub use render::hashtags;

/// A rendered task, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Cleaned title; the file name before collision suffixes.
    pub file_base_name: String,
    /// Labels found in the title (without `@`), excluding extra labels.
    pub labels: Vec<String>,
    /// Full document text.
    pub html: String,
}

/// Split a raw title into its cleaned title and extracted metadata.
pub fn extract_title(raw: &str) -> TitleParts {
    passes::run_pipeline(raw)
}

/// Transform one task into its document.
///
/// `extra_labels` are rendered ahead of the labels found in the title.
#[instrument(skip_all, fields(notes = record.notes.len()))]
pub fn transform(record: &TaskRecord, extra_labels: &[String]) -> Document {
    let parts = extract_title(&record.title);

    debug!(
        title = %parts.title,
        url = parts.url.as_deref().unwrap_or(""),
        ingredients = parts.ingredients.as_deref().unwrap_or(""),
        labels = parts.labels.len(),
        "title extracted"
    );

    let html = render::render_document(&parts, &record.notes, extra_labels);

    Document {
        file_base_name: parts.title,
        labels: parts.labels,
        html,
    }
}
