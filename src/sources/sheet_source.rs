//! The backend seam: one capability interface over two physical
//! spreadsheet representations, selected once per invocation.

use async_trait::async_trait;

use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use crate::google::{DriveClient, MIME_NATIVE_SHEET, MIME_XLSX, SheetsClient};
use crate::model::CellGrid;
use crate::sources::{native::NativeSheetSource, workbook::WorkbookSource};

/// A backend that can list and read the sheets of one resource. Every
/// downstream component (schema inference, record conversion, catalog
/// assembly) is written against this trait only.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Short backend label, used in logs.
    fn kind(&self) -> &'static str;

    /// Sheet names in the resource's own tab order.
    async fn list_sheets(&self) -> Result<Vec<String>, ConnectorError>;

    /// The full used range of one sheet as a raw cell grid.
    async fn read_sheet(&self, sheet_name: &str) -> Result<CellGrid, ConnectorError>;
}

/// The two physical representations a spreadsheet resource can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A native Google Sheets document, read through the Sheets API.
    NativeSheet,
    /// An XLSX workbook stored on Drive, downloaded and parsed locally.
    XlsxWorkbook,
}

/// Map a Drive MIME type to a backend. Exactly two types are supported;
/// anything else aborts the sync rather than guessing.
pub fn classify_mime(mime_type: &str) -> Result<ResourceKind, ConnectorError> {
    match mime_type {
        MIME_XLSX => Ok(ResourceKind::XlsxWorkbook),
        MIME_NATIVE_SHEET => Ok(ResourceKind::NativeSheet),
        other => Err(ConnectorError::UnsupportedResourceType(other.to_string())),
    }
}

/// Classify the resource via the Drive metadata endpoint and construct
/// the matching backend. Classification happens once; the returned
/// backend is fixed for both discovery and read.
pub async fn resolve_source(
    config: &ConnectorConfig,
) -> Result<Box<dyn SheetSource>, ConnectorError> {
    let drive = DriveClient::new(&config.access_token);
    let mime_type = drive.file_mime_type(&config.spreadsheet_id).await?;

    match classify_mime(&mime_type)? {
        ResourceKind::XlsxWorkbook => {
            let source = WorkbookSource::open(&drive, &config.spreadsheet_id).await?;
            Ok(Box::new(source))
        }
        ResourceKind::NativeSheet => {
            let sheets = SheetsClient::new(&config.access_token);
            Ok(Box::new(NativeSheetSource::new(
                sheets,
                &config.spreadsheet_id,
            )))
        }
    }
}
