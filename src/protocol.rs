//! Protocol messages on stdout, one JSON object per line. The protocol
//! owns stdout, so structured logging goes through `LOG` messages too.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::Catalog;

#[derive(Serialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "SPEC")]
    Spec { spec: Value },
    #[serde(rename = "CONNECTION_STATUS")]
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },
    #[serde(rename = "CATALOG")]
    Catalog { catalog: Catalog },
    #[serde(rename = "RECORD")]
    Record { record: Record },
    #[serde(rename = "STATE")]
    State { state: State },
    #[serde(rename = "LOG")]
    Log { log: Log },
}

#[derive(Serialize)]
pub struct ConnectionStatus {
    pub status: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct Record {
    pub stream: String,
    pub data: Map<String, Value>,
    pub emitted_at: i64,
}

#[derive(Serialize)]
pub struct State {
    pub data: Value,
}

#[derive(Serialize)]
pub struct Log {
    pub level: &'static str,
    pub message: String,
}

pub fn emit(message: &Message) -> Result<()> {
    println!("{}", serde_json::to_string(message)?);
    Ok(())
}

pub fn log_info(message: &str) {
    let msg = Message::Log {
        log: Log {
            level: "INFO",
            message: message.to_string(),
        },
    };
    if let Ok(line) = serde_json::to_string(&msg) {
        println!("{line}");
    }
}

pub fn emit_connection_status(ok: bool, message: String) -> Result<()> {
    emit(&Message::ConnectionStatus {
        connection_status: ConnectionStatus {
            status: if ok { "SUCCEEDED" } else { "FAILED" },
            message,
        },
    })
}

pub fn emit_record(stream: &str, data: Map<String, Value>, emitted_at: i64) -> Result<()> {
    emit(&Message::Record {
        record: Record {
            stream: stream.to_string(),
            data,
            emitted_at,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_message_shape() {
        let mut data = Map::new();
        data.insert("name".to_string(), json!("alice"));
        let msg = Message::Record {
            record: Record {
                stream: "people".into(),
                data,
                emitted_at: 1_700_000_000_000,
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "RECORD");
        assert_eq!(value["record"]["stream"], "people");
        assert_eq!(value["record"]["data"]["name"], "alice");
        assert_eq!(value["record"]["emitted_at"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_connection_status_message_shape() {
        let msg = Message::ConnectionStatus {
            connection_status: ConnectionStatus {
                status: "FAILED",
                message: "unsupported resource type: text/csv".into(),
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "CONNECTION_STATUS");
        assert_eq!(value["connectionStatus"]["status"], "FAILED");
        assert!(
            value["connectionStatus"]["message"]
                .as_str()
                .unwrap()
                .contains("unsupported resource type")
        );
    }

    #[test]
    fn test_log_message_shape() {
        let msg = Message::Log {
            log: Log {
                level: "INFO",
                message: "Reading stream: vendas".into(),
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "LOG");
        assert_eq!(value["log"]["level"], "INFO");
    }
}
