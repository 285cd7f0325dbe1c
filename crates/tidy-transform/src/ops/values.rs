//! Cell rewrites within a column.

use std::collections::HashSet;

use tidy_model::{Column, SemanticType, Table, Value};

use super::{cast_value, locate, locate_strings, replace_column};
use crate::error::{CleanError, Result};
use crate::normalization::strip_artifacts;

/// Replace cells whose text is one of `sentinels` with null.
///
/// Matching is exact and case-sensitive. String cells are compared as-is;
/// other cells are compared by their display text, so a `"0"` sentinel also
/// nulls an integer `0`.
pub fn normalize_nulls<S: AsRef<str>>(table: &Table, column: &str, sentinels: &[S]) -> Result<Table> {
    let (idx, source) = locate(table, column)?;
    let set: HashSet<&str> = sentinels.iter().map(AsRef::as_ref).collect();

    let mut replaced = 0usize;
    let values = source
        .values()
        .iter()
        .map(|value| {
            if is_sentinel(value, &set) {
                replaced += 1;
                Value::Null
            } else {
                value.clone()
            }
        })
        .collect();

    tracing::debug!(column, replaced, "mapped sentinels to null");
    replace_column(table, idx, Column::new(column, source.dtype(), values)?)
}

fn is_sentinel(value: &Value, sentinels: &HashSet<&str>) -> bool {
    match value {
        Value::Null => false,
        Value::Str(s) => sentinels.contains(s.as_str()),
        other => sentinels.contains(other.to_string().as_str()),
    }
}

/// Cut every string cell longer than `max_len` characters to its first `max_len` characters.
///
/// Lengths count Unicode scalar values (`char`s), never bytes, so a cut
/// can't split a multi-byte character. Nulls and cells within the bound are
/// left unchanged.
pub fn truncate_strings(table: &Table, column: &str, max_len: usize) -> Result<Table> {
    truncate_strings_except(table, column, max_len, &HashSet::new())
}

/// [`truncate_strings`], leaving cells equal to a `protected` value untouched.
pub(crate) fn truncate_strings_except(
    table: &Table,
    column: &str,
    max_len: usize,
    protected: &HashSet<&str>,
) -> Result<Table> {
    let (idx, source) = locate_strings(table, column, "truncate")?;

    let mut truncated = 0usize;
    let values = source
        .values()
        .iter()
        .map(|value| match value {
            Value::Str(s) if !protected.contains(s.as_str()) => match s.char_indices().nth(max_len) {
                Some((cut, _)) => {
                    truncated += 1;
                    Value::str(&s[..cut])
                }
                None => value.clone(),
            },
            _ => value.clone(),
        })
        .collect();

    tracing::debug!(column, max_len, truncated, "truncated strings");
    replace_column(table, idx, Column::new(column, SemanticType::String, values)?)
}

/// Repair misread UTF-8 in every column name and every string cell.
///
/// Fails with `DuplicateColumnName` if two names collapse into one.
pub fn strip_encoding_artifacts(table: &Table) -> Result<Table> {
    let mut renamed = 0usize;
    let mut cells = 0usize;
    let mut columns = Vec::with_capacity(table.column_count());

    for column in table.columns() {
        let name = strip_artifacts(column.name()).into_owned();
        if name != column.name() {
            tracing::debug!(from = column.name(), to = %name, "repaired column name");
            renamed += 1;
        }

        let values = if column.dtype() == SemanticType::String {
            column
                .values()
                .iter()
                .map(|value| match value {
                    Value::Str(s) => {
                        let fixed = strip_artifacts(s);
                        if fixed != s.as_str() {
                            cells += 1;
                        }
                        Value::str(fixed)
                    }
                    other => other.clone(),
                })
                .collect()
        } else {
            column.values().to_vec()
        };
        columns.push(Column::new(name, column.dtype(), values)?);
    }

    tracing::debug!(renamed, cells, "stripped encoding artifacts");
    Ok(Table::new(columns)?)
}

/// Turn empty and whitespace-only cells of every string column into nulls.
pub fn blank_to_null(table: &Table) -> Result<Table> {
    let columns = table
        .columns()
        .iter()
        .map(|column| {
            if column.dtype() != SemanticType::String {
                return Ok(column.clone());
            }
            let values = column
                .values()
                .iter()
                .map(|value| match value {
                    Value::Str(s) if s.trim().is_empty() => Value::Null,
                    other => other.clone(),
                })
                .collect();
            Column::new(column.name(), column.dtype(), values)
        })
        .collect::<tidy_model::Result<Vec<_>>>()?;
    Ok(Table::new(columns)?)
}

/// Uppercase the string cells of one column.
pub fn uppercase(table: &Table, column: &str) -> Result<Table> {
    let (idx, source) = locate_strings(table, column, "uppercase")?;
    let values = source
        .values()
        .iter()
        .map(|value| match value {
            Value::Str(s) => Value::Str(s.to_uppercase()),
            other => other.clone(),
        })
        .collect();
    replace_column(table, idx, Column::new(column, SemanticType::String, values)?)
}

/// Replace nulls in one column with `value`, parsed as the column's type.
pub fn fill_null(table: &Table, column: &str, value: &str) -> Result<Table> {
    let (idx, source) = locate(table, column)?;
    let fill = cast_value(&Value::str(value), source.dtype()).ok_or_else(|| {
        CleanError::InvalidRule {
            reason: format!(
                "fill value {value:?} is not a valid {} for column '{column}'",
                source.dtype()
            ),
        }
    })?;
    let values = source
        .values()
        .iter()
        .map(|v| if v.is_null() { fill.clone() } else { v.clone() })
        .collect();
    replace_column(table, idx, Column::new(column, source.dtype(), values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zips(values: &[Option<&str>]) -> Table {
        Table::new(vec![Column::from_strings("Incident Zip", values.iter().copied())]).unwrap()
    }

    fn cells(table: &Table, column: &str) -> Vec<Option<String>> {
        table
            .column(column)
            .unwrap()
            .values()
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_normalize_nulls() {
        let table = zips(&[Some("N/A"), Some("10001"), None, Some("n/a")]);
        let out = normalize_nulls(&table, "Incident Zip", &["N/A"]).unwrap();
        assert_eq!(
            cells(&out, "Incident Zip"),
            vec![None, Some("10001".into()), None, Some("n/a".into())]
        );
    }

    #[test]
    fn test_normalize_nulls_on_integers() {
        let table = Table::new(vec![Column::from_integers("Requests", [Some(0), Some(3)])]).unwrap();
        let out = normalize_nulls(&table, "Requests", &["0"]).unwrap();
        assert_eq!(
            out.column("Requests").unwrap().values(),
            &[Value::Null, Value::Int(3)]
        );
    }

    #[test]
    fn test_truncate_counts_chars() {
        let table = zips(&[Some("29616-0759"), Some("83"), Some("Montréal"), None]);
        let out = truncate_strings(&table, "Incident Zip", 5).unwrap();
        assert_eq!(
            cells(&out, "Incident Zip"),
            vec![
                Some("29616".into()),
                Some("83".into()),
                Some("Montr".into()),
                None
            ]
        );
        let out = truncate_strings(&table, "Incident Zip", 6).unwrap();
        assert_eq!(cells(&out, "Incident Zip")[2], Some("Montré".into()));
    }

    #[test]
    fn test_truncate_zero() {
        let table = zips(&[Some("10001")]);
        let out = truncate_strings(&table, "Incident Zip", 0).unwrap();
        assert_eq!(cells(&out, "Incident Zip"), vec![Some(String::new())]);
    }

    #[test]
    fn test_truncate_rejects_numeric_column() {
        let table = Table::new(vec![Column::from_integers("Requests", [Some(100_000)])]).unwrap();
        assert!(matches!(
            truncate_strings(&table, "Requests", 2),
            Err(CleanError::ColumnType {
                operation: "truncate",
                found: SemanticType::Integer,
                ..
            })
        ));
    }

    #[test]
    fn test_truncate_except_protects_sentinels() {
        let table = zips(&[Some("NO CLUE"), Some("29616-0759")]);
        let protected: HashSet<&str> = ["NO CLUE"].into_iter().collect();
        let out = truncate_strings_except(&table, "Incident Zip", 5, &protected).unwrap();
        assert_eq!(
            cells(&out, "Incident Zip"),
            vec![Some("NO CLUE".into()), Some("29616".into())]
        );
    }

    #[test]
    fn test_strip_encoding_artifacts_names_and_cells() {
        let table = Table::new(vec![
            Column::from_strings("ï»¿\"Longitude (x)\"", [Some("-73.75")]),
            Column::from_strings("Weather", [Some("MontrÃ©al Snow")]),
        ])
        .unwrap();
        let out = strip_encoding_artifacts(&table).unwrap();
        assert_eq!(out.column_names(), vec!["Longitude (x)", "Weather"]);
        assert_eq!(cells(&out, "Weather"), vec![Some("Montréal Snow".into())]);
    }

    #[test]
    fn test_strip_encoding_artifacts_collision() {
        let table = Table::new(vec![
            Column::from_strings("Temp (Â°C)", [Some("1")]),
            Column::from_strings("Temp (°C)", [Some("2")]),
        ])
        .unwrap();
        assert_eq!(
            strip_encoding_artifacts(&table),
            Err(CleanError::DuplicateColumnName {
                column: "Temp (°C)".to_string()
            })
        );
    }

    #[test]
    fn test_blank_to_null() {
        let table = Table::new(vec![
            Column::from_strings("Weather", [Some(""), Some("  "), Some("Fog")]),
            Column::from_integers("Hmdx", [None, Some(1), Some(2)]),
        ])
        .unwrap();
        let out = blank_to_null(&table).unwrap();
        assert_eq!(cells(&out, "Weather"), vec![None, None, Some("Fog".into())]);
        assert_eq!(out.column("Hmdx"), table.column("Hmdx"));
    }

    #[test]
    fn test_uppercase() {
        let table = Table::new(vec![Column::from_strings("City", [Some("Brooklyn"), None])]).unwrap();
        let out = uppercase(&table, "City").unwrap();
        assert_eq!(cells(&out, "City"), vec![Some("BROOKLYN".into()), None]);
    }

    #[test]
    fn test_fill_null() {
        let table = zips(&[None, Some("10001")]);
        let out = fill_null(&table, "Incident Zip", "NaN").unwrap();
        assert_eq!(
            cells(&out, "Incident Zip"),
            vec![Some("NaN".into()), Some("10001".into())]
        );

        let numbers = Table::new(vec![Column::from_integers("Requests", [None, Some(3)])]).unwrap();
        let out = fill_null(&numbers, "Requests", "0").unwrap();
        assert_eq!(
            out.column("Requests").unwrap().values(),
            &[Value::Int(0), Value::Int(3)]
        );
        assert!(matches!(
            fill_null(&numbers, "Requests", "none"),
            Err(CleanError::InvalidRule { .. })
        ));
    }
}
