pub mod native;
pub mod sheet_source;
pub mod workbook;

pub use sheet_source::{ResourceKind, SheetSource, classify_mime, resolve_source};
