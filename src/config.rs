//! Connector configuration, loaded from a JSON file supplied by the
//! calling shell.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    /// Opaque identifier of the resource on Drive (native spreadsheet or
    /// XLSX file).
    pub spreadsheet_id: String,

    /// Pre-established read credential (OAuth bearer token). Token
    /// acquisition is the surrounding pipeline's responsibility.
    pub access_token: String,

    /// Normalize header and stream names into identifier-style names.
    #[serde(default)]
    pub names_conversion: bool,
}

impl ConnectorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config = serde_json::from_reader(file)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }
}
