//! Record conversion: schema-guided coercion of normalized rows into
//! ordered JSON objects.

use serde_json::{Map, Value};

use crate::model::{Cell, ColumnType, SheetSchema, number_to_string};
use crate::sheet::SheetData;

/// Convert every data row of a sheet into a record matching the schema's
/// field set exactly. All-empty rows are skipped; short rows yield nulls
/// for their missing trailing columns.
pub fn to_records(sheet: &SheetData, schema: &SheetSchema) -> Vec<Map<String, Value>> {
    sheet
        .rows
        .iter()
        .filter(|row| !row.iter().all(Cell::is_empty))
        .map(|row| {
            schema
                .columns
                .iter()
                .enumerate()
                .map(|(idx, col)| {
                    let cell = row.get(idx).unwrap_or(&Cell::Empty);
                    (col.name.clone(), coerce(cell, col.column_type))
                })
                .collect()
        })
        .collect()
}

/// Coerce one cell toward its column's inferred type. Inference is
/// best-effort: a value that does not fit keeps its raw string form
/// instead of failing the row.
fn coerce(cell: &Cell, target: ColumnType) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match target {
        ColumnType::Number => match cell {
            Cell::Number(n) => number_value(*n),
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => number_value(n),
                Err(_) => Value::String(s.clone()),
            },
            _ => Value::String(cell.display_text()),
        },
        ColumnType::Boolean => match cell {
            Cell::Bool(b) => Value::Bool(*b),
            Cell::Text(s) if s.trim().eq_ignore_ascii_case("true") => Value::Bool(true),
            Cell::Text(s) if s.trim().eq_ignore_ascii_case("false") => Value::Bool(false),
            _ => Value::String(cell.display_text()),
        },
        ColumnType::String => Value::String(cell.display_text()),
    }
}

/// Integral floats serialize as JSON integers, the way the source wrote
/// them.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(number_to_string(n)))
    }
}
