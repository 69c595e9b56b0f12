use thiserror::Error;

/// Failure taxonomy for the connector core.
///
/// Every variant keeps enough detail to tell "wrong resource type" from
/// "wrong credentials/permissions" from "malformed file" apart at the top
/// level. Nothing in the core retries; transport errors surface as-is.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The Drive metadata probe found a MIME type this connector cannot
    /// extract from. Fatal before any stream is produced.
    #[error("unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// Transport-level failure talking to Google (request never completed).
    #[error("request failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Non-2xx response from a Google API, with the remote status and
    /// message intact. A 400-class "operation is not supported for this
    /// document" here is the signal that a resource was misclassified.
    #[error("remote API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The downloaded payload is not a well-formed XLSX package.
    #[error("invalid XLSX workbook: {0}")]
    Parse(#[from] calamine::XlsxError),

    /// A selected stream names a sheet the workbook does not contain
    /// (stale catalog).
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
}
