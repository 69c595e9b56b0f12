//! Native spreadsheet backend: the collaborative Sheets API resolves
//! cell values remotely, so this backend only maps loosely-typed JSON
//! scalars into the shared cell model.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ConnectorError;
use crate::google::SheetsClient;
use crate::model::{Cell, CellGrid};
use crate::sources::sheet_source::SheetSource;

pub struct NativeSheetSource {
    sheets: SheetsClient,
    spreadsheet_id: String,
}

impl NativeSheetSource {
    pub fn new(sheets: SheetsClient, spreadsheet_id: &str) -> Self {
        Self {
            sheets,
            spreadsheet_id: spreadsheet_id.to_string(),
        }
    }
}

#[async_trait]
impl SheetSource for NativeSheetSource {
    fn kind(&self) -> &'static str {
        "native_sheet"
    }

    async fn list_sheets(&self) -> Result<Vec<String>, ConnectorError> {
        self.sheets.sheet_titles(&self.spreadsheet_id).await
    }

    async fn read_sheet(&self, sheet_name: &str) -> Result<CellGrid, ConnectorError> {
        let values = self.sheets.values(&self.spreadsheet_id, sheet_name).await?;
        Ok(values
            .into_iter()
            .map(|row| row.iter().map(cell_from_json).collect())
            .collect())
    }
}

/// Map one JSON scalar from the values endpoint into the cell model.
/// The API reports blank cells inside the populated range as empty
/// strings; those are empty cells, not text.
fn cell_from_json(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Cell::Number(f),
            None => Cell::Text(n.to_string()),
        },
        Value::String(s) if s.is_empty() => Cell::Empty,
        Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}
