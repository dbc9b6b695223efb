//! JSON serialization for programmatic output.

use std::io::{self, Write};

use mork::{Contact, MorkDocument};
use serde::Serialize;

#[derive(Serialize)]
struct RowJson<'a> {
    row: String,
    cells: Vec<CellJson<'a>>,
}

#[derive(Serialize)]
struct CellJson<'a> {
    column_id: i32,
    column: Option<&'a str>,
    value: Option<&'a str>,
}

#[derive(Serialize)]
struct BookJson<'a> {
    path: String,
    contacts: usize,
    rows: usize,
    skipped_cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::other)?;
    writeln!(w)
}

pub(super) fn print_contacts_json<W: Write>(w: &mut W, contacts: &[Contact]) -> io::Result<()> {
    write_json(w, contacts)
}

pub(super) fn print_rows_json<W: Write>(w: &mut W, document: &MorkDocument) -> io::Result<()> {
    let rows: Vec<RowJson<'_>> = document
        .store
        .iter()
        .map(|(key, cells)| RowJson {
            row: key.to_string(),
            cells: cells
                .iter()
                .map(|(column, value)| CellJson {
                    column_id: column,
                    column: document.columns.lookup(column),
                    value: document.values.lookup(value),
                })
                .collect(),
        })
        .collect();
    write_json(w, &rows)
}

pub(super) fn print_book_json<W: Write>(w: &mut W, summary: &super::BookSummary) -> io::Result<()> {
    write_json(
        w,
        &BookJson {
            path: summary.path.display().to_string(),
            contacts: summary.contacts,
            rows: summary.rows,
            skipped_cells: summary.skipped_cells,
            error: summary.error.as_deref(),
        },
    )
}
