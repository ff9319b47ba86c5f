//! Comma-delimited export reader.

use std::path::Path;

use tracing::debug;

use todoexport_shared::{Result, Row, TodoExportError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read every data row of a CSV file with a header row.
pub async fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| TodoExportError::io(path, e))?;
    let rows = parse_rows(&bytes)?;
    debug!(path = %path.display(), rows = rows.len(), "read export rows");
    Ok(rows)
}

/// Parse CSV bytes into rows keyed by header.
///
/// Headers are kept exactly as written. `csv` drops a leading byte-order
/// mark, so it is put back on the first header when the input had one.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(bytes);

    let mut headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(String::from)
        .collect();

    if bytes.starts_with(UTF8_BOM) {
        if let Some(first) = headers.first_mut() {
            if !first.starts_with('\u{FEFF}') {
                first.insert(0, '\u{FEFF}');
            }
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(Row::from_pairs(
            headers.iter().cloned().zip(record.iter().map(String::from)),
        ));
    }

    Ok(rows)
}

fn csv_error(e: csv::Error) -> TodoExportError {
    TodoExportError::csv(e.to_string())
}
