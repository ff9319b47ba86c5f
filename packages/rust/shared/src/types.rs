//! Core domain types for todoexport.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One data row of the export, keyed by header name exactly as it appears
/// in the file (including any invisible prefix the exporter put there).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, if the header has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, or the empty string when the header lacks it.
    pub fn get_or_empty(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }
}

/// Kind of a row, read from the marker column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Task,
    Note,
    /// Section headers and anything else the exporter emits; skipped.
    Other,
}

impl RowKind {
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("task") => Self::Task,
            Some("note") => Self::Note,
            _ => Self::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// TaskRecord / Note
// ---------------------------------------------------------------------------

/// One exported to-do item with its attached notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRecord {
    /// Raw title, still carrying URLs, ingredient lists and `@labels`.
    pub title: String,
    /// Carried through from the export; not rendered.
    pub description: String,
    /// Notes in the order they appear in the file.
    pub notes: Vec<Note>,
}

impl TaskRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            notes: Vec::new(),
        }
    }
}

/// A comment attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub content: String,
    /// Passed through verbatim; never parsed.
    pub date: String,
}
