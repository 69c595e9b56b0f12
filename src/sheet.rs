//! Grid normalization: header detection, row shaping, and the trimming
//! rules both backends share.

use crate::model::{Cell, CellGrid};

/// A sheet's grid normalized against its header row.
///
/// Data rows are already padded/truncated to the header width and
/// all-empty rows are gone, so downstream components can index columns
/// positionally without bounds anxiety.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub raw_headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    /// Normalize a raw grid. Returns `None` for grids with no usable
    /// header row (entirely empty sheet), which the catalog skips.
    pub fn from_grid(grid: CellGrid) -> Option<SheetData> {
        let header_idx = grid.iter().position(|row| !is_empty_row(row))?;

        let mut raw_headers: Vec<String> = grid[header_idx]
            .iter()
            .map(|c| c.display_text().trim().to_string())
            .collect();

        let mut rows: Vec<Vec<Cell>> = grid
            .into_iter()
            .skip(header_idx + 1)
            .map(|mut row| {
                row.resize(raw_headers.len(), Cell::Empty);
                row
            })
            .collect();

        strip_trailing_unnamed_columns(&mut raw_headers, &mut rows);
        if raw_headers.is_empty() {
            return None;
        }

        rows.retain(|row| !is_empty_row(row));
        Some(SheetData {
            raw_headers,
            rows,
        })
    }
}

pub fn is_empty_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_empty)
}

/// Drop trailing columns whose header is blank and whose data cells are
/// all empty. Spreadsheet UIs routinely report a used range wider than
/// the real table; those phantom columns must not become streams fields.
fn strip_trailing_unnamed_columns(headers: &mut Vec<String>, rows: &mut [Vec<Cell>]) {
    let mut width = headers.len();
    while width > 0 {
        let col = width - 1;
        if !headers[col].is_empty() {
            break;
        }
        if rows.iter().any(|row| !row[col].is_empty()) {
            break;
        }
        width -= 1;
    }
    headers.truncate(width);
    for row in rows.iter_mut() {
        row.truncate(width);
    }
}
