//! Spreadsheet input
//!
//! Reads the first worksheet of an uploaded `.xlsx` workbook into ordered
//! [`Record`]s. The first row of the used range is the header; every following
//! row becomes one record, in on-disk order. Cell values are rendered as text so
//! that numeric-looking product codes and URLs are never reinterpreted.

use crate::config::InputConfig;
use crate::error::{Error, Result};
use crate::types::Record;
use calamine::{Data, DataType, Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

/// Parse an uploaded workbook into records, validating the required columns
///
/// Fails with [`Error::Schema`] when either required header is absent and with
/// [`Error::Spreadsheet`] when the bytes are not a readable workbook. Cell
/// contents are not validated; empty names or URLs are passed through.
pub fn parse_records(bytes: &[u8], input: &InputConfig) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::Spreadsheet(format!("failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet("workbook contains no worksheets".to_string()))?
        .map_err(|e| Error::Spreadsheet(format!("failed to read first worksheet: {}", e)))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Err(Error::Spreadsheet("worksheet is empty".to_string())),
    };

    let (name_col, url_col) = locate_columns(&header, input)?;

    let records: Vec<Record> = rows
        .enumerate()
        .map(|(idx, cells)| {
            Record::new(
                idx + 1,
                cells.get(name_col).map(cell_text).unwrap_or_default(),
                cells.get(url_col).map(cell_text).unwrap_or_default(),
            )
        })
        .collect();

    debug!(
        records = records.len(),
        columns = header.len(),
        "parsed spreadsheet"
    );
    Ok(records)
}

/// Find the indices of the required columns, reporting every missing one
fn locate_columns(header: &[String], input: &InputConfig) -> Result<(usize, usize)> {
    let find = |name: &str| header.iter().position(|h| h == name);

    match (
        find(&input.product_name_column),
        find(&input.image_url_column),
    ) {
        (Some(name_col), Some(url_col)) => Ok((name_col, url_col)),
        (name_col, url_col) => {
            let mut missing = Vec::new();
            if name_col.is_none() {
                missing.push(input.product_name_column.clone());
            }
            if url_col.is_none() {
                missing.push(input.image_url_column.clone());
            }
            Err(Error::Schema {
                required: input
                    .required_columns()
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                missing,
            })
        }
    }
}

/// Render a cell as text without numeric or date coercion
///
/// Date-formatted cells come out as `YYYY-MM-DD HH:MM:SS`, not as their serial number.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string(),
    }
}
