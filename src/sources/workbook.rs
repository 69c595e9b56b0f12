//! Binary workbook backend: download the XLSX payload from file storage
//! once, parse it in memory, and serve per-sheet grids from the parsed
//! document.

use std::io::Cursor;

use async_trait::async_trait;
use calamine::{Data, Range, Reader, Xlsx};

use crate::error::ConnectorError;
use crate::google::DriveClient;
use crate::model::{Cell, CellGrid};
use crate::sources::sheet_source::SheetSource;

pub struct WorkbookSource {
    sheets: Vec<(String, CellGrid)>,
}

impl WorkbookSource {
    /// Download and parse the workbook. The whole document is extracted
    /// up front; `list_sheets`/`read_sheet` never touch the network
    /// again within this invocation.
    pub async fn open(drive: &DriveClient, file_id: &str) -> Result<Self, ConnectorError> {
        let payload = drive.download(file_id).await?;
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(payload))?;

        let names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook.worksheet_range(&name)?;
            let grid = grid_from_range(&range);
            sheets.push((name, grid));
        }
        Ok(Self { sheets })
    }
}

#[async_trait]
impl SheetSource for WorkbookSource {
    fn kind(&self) -> &'static str {
        "xlsx_workbook"
    }

    async fn list_sheets(&self) -> Result<Vec<String>, ConnectorError> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn read_sheet(&self, sheet_name: &str) -> Result<CellGrid, ConnectorError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| ConnectorError::SheetNotFound(sheet_name.to_string()))
    }
}

/// Flatten a calamine used range into a raw cell grid, preserving the
/// cell types the format declares.
pub fn grid_from_range(range: &Range<Data>) -> CellGrid {
    range.rows().map(|row| row.iter().map(cell_from_data).collect()).collect()
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Text(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTime;

    #[test]
    fn test_grid_from_range_preserves_declared_types() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 2));
        range.set_value((0, 0), Data::String("name".into()));
        range.set_value((0, 1), Data::String("count".into()));
        range.set_value((0, 2), Data::String("active".into()));
        range.set_value((1, 0), Data::String("alice".into()));
        range.set_value((1, 1), Data::Float(3.0));
        range.set_value((1, 2), Data::Bool(true));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], Cell::Text("name".into()));
        assert_eq!(grid[1][1], Cell::Number(3.0));
        assert_eq!(grid[1][2], Cell::Bool(true));
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let mut range: Range<Data> = Range::new((0, 0), (0, 2));
        range.set_value((0, 0), Data::String("a".into()));
        range.set_value((0, 2), Data::String("c".into()));

        let grid = grid_from_range(&range);
        assert_eq!(grid[0][1], Cell::Empty);
    }

    #[test]
    fn test_datetime_cells_render_iso() {
        // 2024-01-15 00:00:00 in the 1900 date system.
        let dt = ExcelDateTime::new(45306.0, calamine::ExcelDateTimeType::DateTime, false);
        let cell = cell_from_data(&Data::DateTime(dt));
        assert_eq!(cell, Cell::Text("2024-01-15T00:00:00".into()));
    }

    #[test]
    fn test_garbage_payload_is_a_parse_error() {
        let result: Result<Xlsx<_>, _> = Xlsx::new(Cursor::new(b"not a zip archive".to_vec()));
        assert!(result.is_err());
        let err: ConnectorError = result.err().map(ConnectorError::from).unwrap();
        assert!(matches!(err, ConnectorError::Parse(_)));
    }
}
