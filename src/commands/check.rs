//! Connectivity check: classify the resource and perform one minimal
//! backend probe, reporting success or the specific failure reason.

use anyhow::Result;

use crate::ConnectionArgs;
use crate::config::ConnectorConfig;
use crate::protocol;
use crate::sources::resolve_source;

pub async fn run(args: ConnectionArgs) -> Result<()> {
    let config = ConnectorConfig::from_file(&args.config)?;

    match probe(&config).await {
        Ok(sheet_count) => {
            protocol::log_info(&format!("Resource reachable with {sheet_count} sheet(s)"));
            protocol::emit_connection_status(true, String::new())
        }
        Err(reason) => protocol::emit_connection_status(false, reason),
    }
}

/// Classification plus one backend call. For a workbook resource the
/// classifier already downloads and parses the payload, which is the
/// probe; for a native resource the sheet listing is one metadata call.
async fn probe(config: &ConnectorConfig) -> Result<usize, String> {
    let source = resolve_source(config).await.map_err(|e| e.to_string())?;
    protocol::log_info(&format!("Detected {} resource", source.kind()));
    let sheets = source.list_sheets().await.map_err(|e| e.to_string())?;
    Ok(sheets.len())
}
