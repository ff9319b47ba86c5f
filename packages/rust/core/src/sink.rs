//! Where rendered documents go.
//!
//! [`DocumentSink`] is the only I/O the writer needs: an existence check and
//! a write. [`DirectorySink`] backs it with a directory, [`MemorySink`] with a
//! map for headless use and tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use todoexport_shared::{Result, TodoExportError};

/// Extension of every written document.
pub const DOCUMENT_EXTENSION: &str = "html";

/// Destination for rendered documents.
#[allow(async_fn_in_trait)]
pub trait DocumentSink {
    /// Whether a document named `file_name` is already present.
    async fn exists(&self, file_name: &str) -> Result<bool>;

    /// Write `contents` under `file_name`, returning where it landed.
    async fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Pick a free file name for `base`.
///
/// Tries `<base>.html`, then appends `E` to the base until the sink reports
/// no existing document. The sink is asked again on every attempt.
pub async fn resolve_file_name<S: DocumentSink>(sink: &S, base: &str) -> Result<String> {
    let mut stem = base.to_string();
    loop {
        let file_name = format!("{stem}.{DOCUMENT_EXTENSION}");
        if !sink.exists(&file_name).await? {
            return Ok(file_name);
        }
        stem.push('E');
    }
}

// ---------------------------------------------------------------------------
// DirectorySink
// ---------------------------------------------------------------------------

/// Writes documents as UTF-8 files in a single directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    async fn exists(&self, file_name: &str) -> Result<bool> {
        let path = self.dir.join(file_name);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| TodoExportError::io(&path, e))
    }

    async fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| TodoExportError::io(&path, e))?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Keeps documents in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }
}

impl DocumentSink for MemorySink {
    async fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.files.contains_key(file_name))
    }

    async fn write(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        self.files.insert(file_name.to_string(), contents.to_string());
        Ok(PathBuf::from(file_name))
    }
}
