//! End-to-end export: CSV → task records → documents → output directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use todoexport_extract::transform;
use todoexport_shared::{ExportConfig, Result, TaskRecord, TodoExportError};

use crate::assembler;
use crate::reader;
use crate::sink::{DirectorySink, DocumentSink, resolve_file_name};

/// Result of an export run.
#[derive(Debug)]
pub struct ExportResult {
    /// Directory the documents were written to.
    pub output_dir: PathBuf,
    /// Written documents, in source order.
    pub written: Vec<PathBuf>,
    /// Number of task records found.
    pub record_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting export status.
pub trait ProgressReporter: Send + Sync {
    /// Called once the records are known, before the first write.
    fn started(&self, total: usize);
    /// Called after each document is written.
    fn record_written(&self, title: &str, path: &Path, current: usize, total: usize);
    /// Called when the export completes.
    fn done(&self, result: &ExportResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn record_written(&self, _title: &str, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _result: &ExportResult) {}
}

/// Run the full export.
///
/// 1. Check the input exists (nothing is created otherwise)
/// 2. Read rows and assemble task records
/// 3. Create `<output_root>/<input stem>/`
/// 4. Transform and write each record, one at a time
#[instrument(skip_all, fields(input = %config.input.display()))]
pub async fn export(config: &ExportConfig, progress: &dyn ProgressReporter) -> Result<ExportResult> {
    let start = Instant::now();

    let input_exists = tokio::fs::try_exists(&config.input)
        .await
        .map_err(|e| TodoExportError::io(&config.input, e))?;
    if !input_exists {
        return Err(TodoExportError::MissingFile {
            path: config.input.clone(),
        });
    }

    let rows = reader::read_rows(&config.input).await?;
    let records = assembler::assemble(&rows, &config.columns)?;
    info!(rows = rows.len(), records = records.len(), "export parsed");

    let output_dir = config.output_root.join(output_dir_name(&config.input));
    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| TodoExportError::io(&output_dir, e))?;

    let mut sink = DirectorySink::new(&output_dir);
    info!(path = %sink.dir().display(), "writing documents");
    let written = write_documents(&records, &config.labels, &mut sink, progress).await?;

    let result = ExportResult {
        output_dir,
        written,
        record_count: records.len(),
        elapsed: start.elapsed(),
    };
    progress.done(&result);

    info!(
        documents = result.written.len(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "export complete"
    );

    Ok(result)
}

/// Transform and write records in order, awaiting each write before the next.
pub async fn write_documents<S: DocumentSink>(
    records: &[TaskRecord],
    extra_labels: &[String],
    sink: &mut S,
    progress: &dyn ProgressReporter,
) -> Result<Vec<PathBuf>> {
    progress.started(records.len());
    let mut written = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let document = transform(record, extra_labels);

        info!("Generating \"{}\"...", document.file_base_name);
        if !document.labels.is_empty() {
            let labels = serde_json::to_string(&document.labels)
                .map_err(|e| TodoExportError::Serialize(e.to_string()))?;
            info!("LABELS: {labels}");
        }

        let file_name = resolve_file_name(sink, &document.file_base_name).await?;
        let path = sink.write(&file_name, &document.html).await?;

        progress.record_written(&document.file_base_name, &path, index + 1, records.len());
        written.push(path);
    }

    Ok(written)
}

/// Input file name without a trailing `.csv`.
fn output_dir_name(input: &Path) -> OsString {
    let name = if input.extension().is_some_and(|ext| ext == "csv") {
        input.file_stem()
    } else {
        input.file_name()
    };
    name.map(OsString::from)
        .unwrap_or_else(|| OsString::from("export"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use todoexport_shared::{AppConfig, Note};

    use crate::sink::MemorySink;

    const HEADER: &str = "\u{FEFF}TYPE,CONTENT,DESCRIPTION,PRIORITY,DATE\n";

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("{HEADER}{body}")).unwrap();
        path
    }

    fn config(input: PathBuf, output_root: PathBuf, labels: &[&str]) -> ExportConfig {
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        let mut config = ExportConfig::from_app(&AppConfig::default(), input, None, &labels);
        config.output_root = output_root;
        config
    }

    #[test]
    fn output_dir_name_drops_csv_extension() {
        assert_eq!(output_dir_name(Path::new("exports/Meals.csv")), "Meals");
        assert_eq!(output_dir_name(Path::new("Meals.csv")), "Meals");
        assert_eq!(output_dir_name(Path::new("dir/Meals.txt")), "Meals.txt");
    }

    #[tokio::test]
    async fn write_documents_resolves_collisions_in_order() {
        let records = vec![
            TaskRecord::new("Soup", ""),
            TaskRecord::new("Soup @quick", ""),
            TaskRecord::new("[Soup]", ""),
        ];
        let mut sink = MemorySink::new();
        let written = write_documents(&records, &[], &mut sink, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("Soup.html"),
                PathBuf::from("SoupE.html"),
                PathBuf::from("SoupEE.html"),
            ]
        );
        assert!(sink.files()["SoupE.html"].contains("#quick"));
        assert!(sink.files()["SoupEE.html"].contains("<title>Soup</title>"));
    }

    #[tokio::test]
    async fn write_documents_renders_notes() {
        let mut record = TaskRecord::new("Bread (flour, water, salt)", "");
        record.notes.push(Note {
            content: "Proof overnight".into(),
            date: "2024-02-03".into(),
        });
        let mut sink = MemorySink::new();
        write_documents(&[record], &["baking".to_string()], &mut sink, &SilentProgress)
            .await
            .unwrap();

        let html = &sink.files()["Bread.html"];
        assert!(html.contains("<h2>flour, water, salt</h2>"));
        assert!(html.contains("<br/>#baking<br/><br/>"));
        assert!(html.contains("</b>2024-02-03</b>:<br/><br/>Proof overnight<br/>"));
    }

    #[tokio::test]
    async fn export_writes_one_file_per_task() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_csv(
            tmp.path(),
            "Meals.csv",
            "task,\"Soup (carrots, celery) @dinner\",,4,\n\
             note,Add salt,,,2024-01-05\n\
             section,Later,,,\n\
             task,Soup,,4,\n\
             task,@quick,,4,\n",
        );
        let output_root = tmp.path().join("output");

        let result = export(&config(input, output_root.clone(), &["meal"]), &SilentProgress)
            .await
            .unwrap();

        let dir = output_root.join("Meals");
        assert_eq!(result.output_dir, dir);
        assert_eq!(result.record_count, 3);
        assert_eq!(
            result.written,
            vec![
                dir.join("Soup.html"),
                dir.join("SoupE.html"),
                dir.join("FIX_ME.html"),
            ]
        );

        let first = std::fs::read_to_string(dir.join("Soup.html")).unwrap();
        assert!(first.starts_with(
            "<html lang=\"en\"><head><title>Soup</title></head><body><h2>carrots, celery</h2>"
        ));
        assert!(first.contains("<br/>#meal #dinner<br/><br/>"));
        assert!(first.contains("</b>2024-01-05</b>:<br/><br/>Add salt<br/>"));

        let second = std::fs::read_to_string(dir.join("SoupE.html")).unwrap();
        assert!(second.contains("<h2>undefined</h2>"));
    }

    #[tokio::test]
    async fn export_keeps_existing_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_csv(tmp.path(), "Meals.csv", "task,Soup,,4,\n");
        let output_root = tmp.path().join("output");
        let cfg = config(input, output_root.clone(), &[]);

        export(&cfg, &SilentProgress).await.unwrap();
        let second = export(&cfg, &SilentProgress).await.unwrap();

        assert_eq!(second.written, vec![output_root.join("Meals").join("SoupE.html")]);
    }

    #[tokio::test]
    async fn export_missing_input_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let output_root = tmp.path().join("output");
        let cfg = config(tmp.path().join("absent.csv"), output_root.clone(), &[]);

        let err = export(&cfg, &SilentProgress).await.unwrap_err();
        assert!(matches!(err, TodoExportError::MissingFile { .. }));
        assert!(!output_root.exists());
    }

    #[tokio::test]
    async fn export_orphan_note_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_csv(tmp.path(), "Meals.csv", "note,Lost,,,2024-01-01\ntask,Soup,,4,\n");
        let output_root = tmp.path().join("output");

        let err = export(&config(input, output_root.clone(), &[]), &SilentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, TodoExportError::OrphanNote { record: 1 }));
        assert!(!output_root.join("Meals").join("Soup.html").exists());
    }
}
