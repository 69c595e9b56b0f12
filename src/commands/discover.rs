//! Discovery: emit the catalog of schema-discoverable streams.

use anyhow::Result;

use crate::ConnectionArgs;
use crate::catalog::{build_catalog, load_sheets};
use crate::config::ConnectorConfig;
use crate::protocol::{self, Message};
use crate::sources::resolve_source;

pub async fn run(args: ConnectionArgs) -> Result<()> {
    let config = ConnectorConfig::from_file(&args.config)?;

    let source = resolve_source(&config).await?;
    protocol::log_info(&format!("Routing to {} backend", source.kind()));

    let sheets = load_sheets(source.as_ref(), config.names_conversion).await?;
    for sheet in &sheets {
        protocol::log_info(&format!(
            "Stream '{}': {} columns, {} rows",
            sheet.stream_name,
            sheet.schema.columns.len(),
            sheet.data.rows.len(),
        ));
    }

    protocol::emit(&Message::Catalog {
        catalog: build_catalog(&sheets),
    })
}
