//! Shared vocabulary types: raw cells, grids, and inferred schemas.

/// A raw cell value as either upstream API hands it to us.
///
/// Both sources are weakly typed: the Sheets values endpoint returns JSON
/// scalars, and XLSX encodes a type tag per cell. Everything funnels into
/// this variant so inference and coercion stay explicit and local.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The cell's textual form, used for header names and as the
    /// raw-string fallback during coercion.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => number_to_string(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// One sheet's used range: ordered rows of ordered cells.
pub type CellGrid = Vec<Vec<Cell>>;

/// Primitive column types the inferencer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Number,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, typed column. Order within a schema is the header row's
/// left-to-right order and is preserved everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// The inferred, ordered schema for one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSchema {
    pub columns: Vec<Column>,
}

impl SheetSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Render a float the way a spreadsheet user wrote it: integral values
/// without a trailing `.0`.
pub fn number_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
