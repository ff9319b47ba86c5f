//! Task record assembler.
//!
//! Groups flat export rows into tasks: a `task` row opens a record, every
//! following `note` row attaches to it, anything else is skipped.

use tracing::{debug, instrument};

use todoexport_shared::{ColumnsConfig, Note, Result, Row, RowKind, TaskRecord, TodoExportError};

/// Fold rows into task records, preserving row order.
///
/// The open record is carried through the fold and only emitted when the next
/// task starts or the input ends. A note with no open record fails with
/// [`TodoExportError::OrphanNote`].
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn assemble(rows: &[Row], columns: &ColumnsConfig) -> Result<Vec<TaskRecord>> {
    let (mut records, open) = rows.iter().enumerate().try_fold(
        (Vec::new(), None::<TaskRecord>),
        |(mut records, open), (index, row)| -> Result<_> {
            match RowKind::from_marker(row.get(&columns.type_column)) {
                RowKind::Task => {
                    records.extend(open);
                    let task = TaskRecord::new(
                        row.get_or_empty(&columns.content),
                        row.get_or_empty(&columns.description),
                    );
                    Ok((records, Some(task)))
                }
                RowKind::Note => {
                    let mut task = open.ok_or(TodoExportError::OrphanNote { record: index + 1 })?;
                    task.notes.push(Note {
                        content: row.get_or_empty(&columns.content),
                        date: row.get_or_empty(&columns.date),
                    });
                    Ok((records, Some(task)))
                }
                RowKind::Other => Ok((records, open)),
            }
        },
    )?;
    records.extend(open);

    debug!(records = records.len(), "assembled task records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use todoexport_shared::TODOIST_TYPE_COLUMN;

    fn task(title: &str) -> Row {
        Row::from_pairs([
            (TODOIST_TYPE_COLUMN, "task"),
            ("CONTENT", title),
            ("DESCRIPTION", "desc"),
            ("DATE", ""),
        ])
    }

    fn note(content: &str, date: &str) -> Row {
        Row::from_pairs([
            (TODOIST_TYPE_COLUMN, "note"),
            ("CONTENT", content),
            ("DESCRIPTION", ""),
            ("DATE", date),
        ])
    }

    fn section(name: &str) -> Row {
        Row::from_pairs([(TODOIST_TYPE_COLUMN, "section"), ("CONTENT", name)])
    }

    #[test]
    fn notes_attach_to_latest_task() {
        let rows = vec![
            task("Soup"),
            note("a", "d1"),
            note("b", "d2"),
            task("Bread"),
            task("Salad"),
            note("c", "d3"),
        ];
        let records = assemble(&rows, &ColumnsConfig::default()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Soup");
        assert_eq!(records[0].description, "desc");
        let contents: Vec<_> = records[0].notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b"]);
        assert_eq!(records[0].notes[1].date, "d2");
        assert!(records[1].notes.is_empty());
        assert_eq!(records[2].notes.len(), 1);
        assert_eq!(records[2].notes[0].content, "c");
    }

    #[test]
    fn note_and_task_counts_are_preserved() {
        let rows = vec![
            task("one"),
            section("Meals"),
            note("x", ""),
            task("two"),
            note("y", ""),
            note("z", ""),
        ];
        let records = assemble(&rows, &ColumnsConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.iter().map(|r| r.notes.len()).sum::<usize>(), 3);
    }

    #[test]
    fn other_markers_are_skipped() {
        let rows = vec![section("Meals"), task("Soup"), section("Other")];
        let records = assemble(&rows, &ColumnsConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Soup");
    }

    #[test]
    fn note_before_any_task_fails() {
        let rows = vec![section("Meals"), note("orphan", "d1"), task("Soup")];
        let err = assemble(&rows, &ColumnsConfig::default()).unwrap_err();
        assert!(matches!(err, TodoExportError::OrphanNote { record: 2 }));
    }

    #[test]
    fn marker_column_must_match_exactly() {
        let rows = vec![Row::from_pairs([("TYPE", "task"), ("CONTENT", "Soup")])];
        let records = assemble(&rows, &ColumnsConfig::default()).unwrap();
        assert!(records.is_empty());

        let columns = ColumnsConfig {
            type_column: "TYPE".into(),
            ..Default::default()
        };
        let records = assemble(&rows, &columns).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(assemble(&[], &ColumnsConfig::default()).unwrap().is_empty());
    }
}
