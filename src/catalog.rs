//! Stream catalog assembly: one discoverable stream per non-empty sheet,
//! in the backend's own sheet order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ConnectorError;
use crate::model::SheetSchema;
use crate::protocol;
use crate::schema::{convert_name, infer_schema};
use crate::sheet::SheetData;
use crate::sources::SheetSource;

/// One sheet extracted through a backend, ready for inference and
/// conversion.
pub struct LoadedSheet {
    pub stream_name: String,
    pub data: SheetData,
    pub schema: SheetSchema,
}

/// The discoverable stream list, serialized as the pipeline's catalog
/// declaration.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub streams: Vec<CatalogStream>,
}

#[derive(Debug, Serialize)]
pub struct CatalogStream {
    pub name: String,
    pub json_schema: Value,
    pub supported_sync_modes: Vec<String>,
}

/// Fetch and normalize every sheet of the resource. Empty sheets are
/// skipped with a log line, never an error. Deterministic for an
/// unchanged resource: same order, names, and inferred types every call.
pub async fn load_sheets(
    source: &dyn SheetSource,
    names_conversion: bool,
) -> Result<Vec<LoadedSheet>, ConnectorError> {
    let mut loaded = Vec::new();
    for sheet_name in source.list_sheets().await? {
        let grid = source.read_sheet(&sheet_name).await?;
        let Some(data) = SheetData::from_grid(grid) else {
            protocol::log_info(&format!("Skipping empty sheet: {sheet_name}"));
            continue;
        };
        let schema = infer_schema(&data, names_conversion);
        let stream_name = if names_conversion {
            convert_name(&sheet_name)
        } else {
            sheet_name
        };
        loaded.push(LoadedSheet {
            stream_name,
            data,
            schema,
        });
    }
    Ok(loaded)
}

/// Assemble the catalog from loaded sheets.
pub fn build_catalog(sheets: &[LoadedSheet]) -> Catalog {
    Catalog {
        streams: sheets
            .iter()
            .map(|sheet| CatalogStream {
                name: sheet.stream_name.clone(),
                json_schema: json_schema(&sheet.schema),
                supported_sync_modes: vec!["full_refresh".to_string()],
            })
            .collect(),
    }
}

/// Render an inferred schema as a JSON Schema object whose `properties`
/// keep the header row's column order.
pub fn json_schema(schema: &SheetSchema) -> Value {
    let mut properties = Map::new();
    for column in &schema.columns {
        properties.insert(
            column.name.clone(),
            json!({ "type": [column.column_type.as_str(), "null"] }),
        );
    }
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": properties,
    })
}

/// The stream names a configured catalog selects for reading.
pub fn selected_stream_names(catalog: &Value) -> HashSet<String> {
    ConfiguredCatalog::deserialize(catalog)
        .map(|c| c.streams.into_iter().map(|s| s.stream.name).collect())
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ConfiguredCatalog {
    #[serde(default)]
    streams: Vec<ConfiguredStream>,
}

#[derive(Deserialize)]
struct ConfiguredStream {
    stream: ConfiguredStreamDescriptor,
}

#[derive(Deserialize)]
struct ConfiguredStreamDescriptor {
    name: String,
}
