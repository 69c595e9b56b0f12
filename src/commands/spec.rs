//! The connector's connection specification.

use anyhow::Result;
use serde_json::json;

use crate::protocol::{self, Message};

pub fn run() -> Result<()> {
    let spec = json!({
        "documentationUrl": "https://developers.google.com/sheets/api",
        "connectionSpecification": {
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Google Sheets / XLSX Source Spec",
            "type": "object",
            "required": ["spreadsheet_id", "access_token"],
            "properties": {
                "spreadsheet_id": {
                    "type": "string",
                    "title": "Spreadsheet ID",
                    "description": "Drive file ID of the spreadsheet (native Google Sheets or XLSX)."
                },
                "access_token": {
                    "type": "string",
                    "title": "Access Token",
                    "description": "OAuth bearer token with read access to Drive and Sheets.",
                    "airbyte_secret": true
                },
                "names_conversion": {
                    "type": "boolean",
                    "title": "Convert Column Names",
                    "description": "Normalize sheet and column names to identifier-style names (lowercase, underscores).",
                    "default": false
                }
            }
        }
    });

    protocol::emit(&Message::Spec { spec })
}
