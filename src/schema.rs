//! Schema inference: column naming and bounded-sample type detection.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::model::{Cell, Column, ColumnType, SheetSchema};
use crate::sheet::SheetData;

/// Upper bound on the number of data rows scanned per column when
/// inferring types.
pub const SCHEMA_SAMPLE_SIZE: usize = 1000;

/// Convert a header (or sheet) name into a safe identifier-style name:
/// accents folded to ASCII, lower-cased, runs of non-alphanumeric
/// characters collapsed to a single underscore (dropped at either end),
/// and a leading digit escaped with an underscore.
pub fn convert_name(raw: &str) -> String {
    let folded: String = raw.nfkd().filter(char::is_ascii).collect();

    let mut out = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        return "unnamed".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Disambiguate duplicate names by appending `_2`, `_3`, ... in
/// left-to-right order. Duplicates must never silently collide, so the
/// suffix also skips names already present in the input.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if used.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{name}_{suffix}");
            if used.insert(candidate.clone()) {
                out.push(candidate);
                break;
            }
            suffix += 1;
        }
    }
    out
}

/// Final column names for a sheet, honoring the `names_conversion` option.
pub fn column_names(raw_headers: &[String], names_conversion: bool) -> Vec<String> {
    let names = if names_conversion {
        raw_headers.iter().map(|h| convert_name(h)).collect()
    } else {
        raw_headers.to_vec()
    };
    dedupe_names(names)
}

/// The primitive type one cell would satisfy, or `None` for empty cells.
fn cell_type(cell: &Cell) -> Option<ColumnType> {
    match cell {
        Cell::Empty => None,
        Cell::Number(_) => Some(ColumnType::Number),
        Cell::Bool(_) => Some(ColumnType::Boolean),
        Cell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.parse::<f64>().is_ok() {
                Some(ColumnType::Number)
            } else if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false")
            {
                Some(ColumnType::Boolean)
            } else {
                Some(ColumnType::String)
            }
        }
    }
}

/// Infer one column's type from a sample of rows: `number` when every
/// non-empty value parses as a number, `boolean` when every non-empty
/// value is a boolean literal, otherwise `string`. An all-empty column
/// defaults to `string`.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a Cell>) -> ColumnType {
    let mut seen: Option<ColumnType> = None;
    for cell in cells {
        let Some(ty) = cell_type(cell) else {
            continue;
        };
        match seen {
            None => seen = Some(ty),
            Some(prev) if prev == ty => {}
            Some(_) => return ColumnType::String,
        }
    }
    seen.unwrap_or(ColumnType::String)
}

/// Derive the declarative schema for a normalized sheet.
pub fn infer_schema(sheet: &SheetData, names_conversion: bool) -> SheetSchema {
    let names = column_names(&sheet.raw_headers, names_conversion);
    let sample = &sheet.rows[..sheet.rows.len().min(SCHEMA_SAMPLE_SIZE)];

    let columns = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Column {
            name,
            column_type: infer_column_type(sample.iter().map(|row| &row[idx])),
        })
        .collect();

    SheetSchema { columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sheet(headers: &[&str], rows: Vec<Vec<Cell>>) -> SheetData {
        SheetData {
            raw_headers: headers.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn test_convert_name_basic() {
        assert_eq!(convert_name("First Name"), "first_name");
        assert_eq!(convert_name("col123"), "col123");
        assert_eq!(convert_name("a  --  b"), "a_b");
    }

    #[test]
    fn test_convert_name_leading_digit() {
        assert_eq!(convert_name("2nd Col"), "_2nd_col");
    }

    #[test]
    fn test_convert_name_accents() {
        assert_eq!(convert_name("Descrição"), "descricao");
        assert_eq!(convert_name("Préço Médio"), "preco_medio");
    }

    #[test]
    fn test_convert_name_strips_edge_separators() {
        assert_eq!(convert_name("valor (R$)"), "valor_r");
        assert_eq!(convert_name("  spaced  "), "spaced");
        assert_eq!(convert_name("(total)"), "total");
    }

    #[test]
    fn test_convert_name_empty_falls_back() {
        assert_eq!(convert_name(""), "unnamed");
        assert_eq!(convert_name("  $$  "), "unnamed");
    }

    #[test]
    fn test_dedupe_names_suffixes_from_two() {
        assert_eq!(
            dedupe_names(vec!["col".into(), "col".into(), "col".into()]),
            vec!["col", "col_2", "col_3"]
        );
    }

    #[test]
    fn test_dedupe_names_skips_existing_suffixed_name() {
        assert_eq!(
            dedupe_names(vec!["a".into(), "a".into(), "a_2".into()]),
            vec!["a", "a_2", "a_2_2"]
        );
    }

    #[test]
    fn test_column_names_conversion_and_dedup() {
        let headers = vec![
            "First Name".to_string(),
            "2nd Col".to_string(),
            "First Name".to_string(),
        ];
        assert_eq!(
            column_names(&headers, true),
            vec!["first_name", "_2nd_col", "first_name_2"]
        );
    }

    #[test]
    fn test_column_names_verbatim_without_conversion() {
        let headers = vec!["First Name".to_string(), "First Name".to_string()];
        assert_eq!(
            column_names(&headers, false),
            vec!["First Name", "First Name_2"]
        );
    }

    #[test]
    fn test_infer_number_column() {
        let s = sheet(
            &["n"],
            vec![vec![text("1")], vec![text("2")], vec![text("3")]],
        );
        assert_eq!(
            infer_schema(&s, false).columns[0].column_type,
            ColumnType::Number
        );
    }

    #[test]
    fn test_infer_boolean_column() {
        let s = sheet(&["b"], vec![vec![text("true")], vec![text("FALSE")]]);
        assert_eq!(
            infer_schema(&s, false).columns[0].column_type,
            ColumnType::Boolean
        );
    }

    #[test]
    fn test_mixed_column_is_string() {
        let s = sheet(&["m"], vec![vec![text("1")], vec![text("x")]]);
        assert_eq!(
            infer_schema(&s, false).columns[0].column_type,
            ColumnType::String
        );
    }

    #[test]
    fn test_number_and_boolean_mix_is_string() {
        let s = sheet(&["m"], vec![vec![Cell::Number(1.0)], vec![Cell::Bool(true)]]);
        assert_eq!(
            infer_schema(&s, false).columns[0].column_type,
            ColumnType::String
        );
    }

    #[test]
    fn test_all_empty_column_is_string() {
        let s = sheet(&["e"], vec![vec![Cell::Empty], vec![Cell::Empty]]);
        assert_eq!(
            infer_schema(&s, false).columns[0].column_type,
            ColumnType::String
        );
    }

    #[test]
    fn test_tagged_cells_infer_their_type() {
        let s = sheet(
            &["n", "b"],
            vec![
                vec![Cell::Number(1.5), Cell::Bool(true)],
                vec![Cell::Empty, Cell::Bool(false)],
            ],
        );
        let schema = infer_schema(&s, false);
        assert_eq!(schema.columns[0].column_type, ColumnType::Number);
        assert_eq!(schema.columns[1].column_type, ColumnType::Boolean);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let s = sheet(
            &["a", "b"],
            vec![vec![text("1"), text("x")], vec![text("2"), text("y")]],
        );
        assert_eq!(infer_schema(&s, true), infer_schema(&s, true));
    }
}
