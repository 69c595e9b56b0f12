//! Thin clients for the two Google endpoints the connector consumes:
//! Drive (metadata + content download) and Sheets v4 (sheet metadata +
//! value ranges). Authentication context is a pre-established bearer
//! token; acquiring it is the caller's concern.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConnectorError;

pub const MIME_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_NATIVE_SHEET: &str = "application/vnd.google-apps.spreadsheet";

pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Google Drive file-storage client: resolves a resource's content type
/// and downloads its binary payload.
pub struct DriveClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DriveClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, DRIVE_BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// The resource's MIME type, from the file metadata endpoint.
    pub async fn file_mime_type(&self, file_id: &str) -> Result<String, ConnectorError> {
        let url = format!(
            "{}/files/{}?fields=mimeType&supportsAllDrives=true",
            self.base_url, file_id
        );
        let response = self.get(&url).await?;
        let metadata: FileMetadata = ok_response(response).await?.json().await?;
        Ok(metadata.mime_type)
    }

    /// Download the resource's full binary content in a single request.
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>, ConnectorError> {
        let url = format!(
            "{}/files/{}?alt=media&supportsAllDrives=true",
            self.base_url, file_id
        );
        let response = self.get(&url).await?;
        let bytes = ok_response(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str) -> Result<Response, ConnectorError> {
        Ok(self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?)
    }
}

/// Google Sheets v4 client: enumerates sheet titles and fetches one
/// populated value range per sheet.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl SheetsClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, SHEETS_BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Sheet titles in the spreadsheet's own tab order.
    pub async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, ConnectorError> {
        let url = format!(
            "{}/spreadsheets/{}?fields=sheets.properties(title)",
            self.base_url, spreadsheet_id
        );
        let response = self.get(&url).await?;
        let metadata: SpreadsheetMetadata = ok_response(response).await?.json().await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// The full populated range of one sheet, as loosely-typed JSON
    /// scalars already resolved by the remote service.
    pub async fn values(
        &self,
        spreadsheet_id: &str,
        sheet_title: &str,
    ) -> Result<Vec<Vec<Value>>, ConnectorError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            spreadsheet_id,
            range_path_segment(sheet_title)
        );
        let response = self.get(&url).await?;
        let range: ValueRange = ok_response(response).await?.json().await?;
        Ok(range.values)
    }

    async fn get(&self, url: &str) -> Result<Response, ConnectorError> {
        Ok(self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?)
    }
}

/// Quote a sheet title for use as an A1 range, doubling embedded quotes.
fn quote_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Characters that may not appear literally inside a URL path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Quote a sheet title as an A1 range and percent-encode it so the whole
/// range stays a single path segment. Sheet titles are arbitrary text and
/// may contain `/`, `?`, `#`, or `%`.
fn range_path_segment(title: &str) -> String {
    utf8_percent_encode(&quote_range(title), SEGMENT_ENCODE_SET).to_string()
}

/// Pass 2xx responses through; turn anything else into an `Api` error
/// carrying the remote status and message. Never swallowed, never
/// retried: a 400-class "operation is not supported for this document"
/// is exactly how a misclassified resource announces itself.
async fn ok_response(response: Response) -> Result<Response, ConnectorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &str) -> ConnectorError {
    ConnectorError::Api {
        status: status.as_u16(),
        message: extract_error_message(body)
            .unwrap_or_else(|| body.trim().to_string()),
    }
}

/// Pull `error.message` out of Google's JSON error envelope.
fn extract_error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    Some(envelope.error.message)
}

#[derive(Deserialize)]
struct FileMetadata {
    #[serde(rename = "mimeType")]
    mime_type: String,
}

#[derive(Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
