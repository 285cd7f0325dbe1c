//! Columnar tables.
//!
//! A [`Table`] is an ordered list of uniquely named [`Column`]s that all hold
//! the same number of rows. Both invariants are checked on construction, so
//! every `Table` value in the workspace is well-formed.

use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::schema::{ColumnSpec, SemanticType};
use crate::value::Value;

/// A named sequence of values sharing one semantic type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: SemanticType,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, checking that every non-null value matches `dtype`.
    pub fn new(name: impl Into<String>, dtype: SemanticType, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        for (row, value) in values.iter().enumerate() {
            if let Some(found) = value.semantic_type()
                && found != dtype
            {
                return Err(ModelError::TypeMismatch {
                    column: name,
                    row,
                    expected: dtype,
                    found,
                });
            }
        }
        Ok(Self {
            name,
            dtype,
            values,
        })
    }

    /// Build a string column; `None` entries become nulls.
    pub fn from_strings<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        Self {
            name: name.into(),
            dtype: SemanticType::String,
            values: values.into_iter().map(Value::from_opt_str).collect(),
        }
    }

    /// Build an integer column; `None` entries become nulls.
    pub fn from_integers(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self {
            name: name.into(),
            dtype: SemanticType::Integer,
            values: values.into_iter().map(Value::from).collect(),
        }
    }

    /// Build a float column; `None` entries become nulls.
    pub fn from_floats(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            name: name.into(),
            dtype: SemanticType::Float,
            values: values.into_iter().map(Value::from).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> SemanticType {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Same column under a different name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Decompose into name, type and values.
    pub fn into_parts(self) -> (String, SemanticType, Vec<Value>) {
        (self.name, self.dtype, self.values)
    }

    /// Column containing only the given rows, in the given order.
    ///
    /// Indices must be in bounds.
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype,
            values: rows.iter().map(|&idx| self.values[idx].clone()).collect(),
        }
    }
}

/// An in-memory columnar dataset with a uniform row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    ///
    /// Fails with `DuplicateColumnName` or `RowCountMismatch`.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ModelError::DuplicateColumnName {
                    column: column.name().to_string(),
                });
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(ModelError::RowCountMismatch {
                    column: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Look up a column by exact (case- and whitespace-sensitive) name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ModelError::UnknownColumn {
                column: name.to_string(),
            })
    }

    /// Cells of one row in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    /// Project and reorder columns.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Keep only the listed rows, in the listed order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let rows: Vec<usize> = (0..self.row_count().min(n)).collect();
        self.take_rows(&rows)
    }

    /// Distinct values of a column in first-seen order, nulls included once.
    pub fn unique(&self, name: &str) -> Result<Vec<Value>> {
        let column = self.column(name)?;
        let mut seen: Vec<Value> = Vec::new();
        for value in column.values() {
            if !seen.iter().any(|v| v.total_cmp(value).is_eq()) {
                seen.push(value.clone());
            }
        }
        Ok(seen)
    }

    pub fn null_count(&self, name: &str) -> Result<usize> {
        Ok(self.column(name)?.null_count())
    }

    /// Describe the table as column specs; a column is nullable when it holds a null.
    pub fn schema(&self) -> Vec<ColumnSpec> {
        self.columns
            .iter()
            .map(|c| ColumnSpec {
                name: c.name().to_string(),
                dtype: c.dtype(),
                nullable: c.null_count() > 0,
            })
            .collect()
    }

    /// Check the table against declared specs.
    ///
    /// Every spec must name an existing column of the declared type, and
    /// non-nullable columns must hold no nulls. Extra columns are allowed.
    pub fn conform_to(&self, specs: &[ColumnSpec]) -> Result<()> {
        for spec in specs {
            let column = self.column(&spec.name)?;
            if column.dtype() != spec.dtype {
                return Err(ModelError::TypeMismatch {
                    column: spec.name.clone(),
                    row: 0,
                    expected: spec.dtype,
                    found: column.dtype(),
                });
            }
            if !spec.nullable
                && let Some(row) = column.values().iter().position(Value::is_null)
            {
                return Err(ModelError::UnexpectedNull {
                    column: spec.name.clone(),
                    row,
                });
            }
        }
        Ok(())
    }

    /// Append the rows of `other` below this table.
    ///
    /// Column names, order and types must match exactly.
    pub fn vstack(&self, other: &Self) -> Result<Self> {
        if self.column_count() == 0 {
            return Ok(other.clone());
        }
        if other.column_count() == 0 {
            return Ok(self.clone());
        }
        if self.column_names() != other.column_names() {
            return Err(ModelError::SchemaMismatch {
                reason: format!(
                    "column names differ: [{}] vs [{}]",
                    self.column_names().join(", "),
                    other.column_names().join(", ")
                ),
            });
        }
        let mut columns = Vec::with_capacity(self.column_count());
        for (left, right) in self.columns.iter().zip(&other.columns) {
            if left.dtype() != right.dtype() {
                return Err(ModelError::SchemaMismatch {
                    reason: format!(
                        "column '{}' is {} in one table and {} in the other",
                        left.name(),
                        left.dtype(),
                        right.dtype()
                    ),
                });
            }
            let mut values = Vec::with_capacity(left.len() + right.len());
            values.extend_from_slice(left.values());
            values.extend_from_slice(right.values());
            columns.push(Column {
                name: left.name.clone(),
                dtype: left.dtype,
                values,
            });
        }
        Ok(Self { columns })
    }

    /// Stack several tables with identical schemas.
    pub fn concat(tables: impl IntoIterator<Item = Self>) -> Result<Self> {
        tables
            .into_iter()
            .try_fold(Self::empty(), |acc, table| acc.vstack(&table))
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zips() -> Table {
        Table::new(vec![
            Column::from_strings("Incident Zip", [Some("10001"), None, Some("77056")]),
            Column::from_strings("City", [Some("NEW YORK"), Some("BRONX"), Some("HOUSTON")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::from_strings("City", [Some("a")]),
            Column::from_strings("City", [Some("b")]),
        ]);
        assert_eq!(
            result,
            Err(ModelError::DuplicateColumnName {
                column: "City".to_string()
            })
        );
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::from_strings("A", [Some("a"), Some("b")]),
            Column::from_strings("B", [Some("b")]),
        ]);
        assert!(matches!(
            result,
            Err(ModelError::RowCountMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_column_new_checks_types() {
        let result = Column::new(
            "Temp",
            SemanticType::Float,
            vec![Value::Float(1.0), Value::str("x")],
        );
        assert!(matches!(result, Err(ModelError::TypeMismatch { row: 1, .. })));
    }

    #[test]
    fn test_column_lookup_is_exact() {
        let table = zips();
        assert!(table.column("City").is_ok());
        assert!(matches!(
            table.column("City "),
            Err(ModelError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_select_reorders() {
        let table = zips().select(&["City", "Incident Zip"]).unwrap();
        assert_eq!(table.column_names(), vec!["City", "Incident Zip"]);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_unique_keeps_first_seen_order() {
        let table = Table::new(vec![Column::from_strings(
            "Borough",
            [Some("BROOKLYN"), None, Some("QUEENS"), Some("BROOKLYN"), None],
        )])
        .unwrap();
        assert_eq!(
            table.unique("Borough").unwrap(),
            vec![Value::str("BROOKLYN"), Value::Null, Value::str("QUEENS")]
        );
    }

    #[test]
    fn test_vstack_and_concat() {
        let table = zips();
        let stacked = Table::concat([table.clone(), table.clone(), table]).unwrap();
        assert_eq!(stacked.row_count(), 9);
        assert_eq!(stacked.null_count("Incident Zip").unwrap(), 3);
    }

    #[test]
    fn test_vstack_rejects_different_columns() {
        let other = Table::new(vec![Column::from_strings("Zip", [Some("1")])]).unwrap();
        assert!(matches!(
            zips().vstack(&other),
            Err(ModelError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_conform_to() {
        let table = zips();
        let ok = [ColumnSpec::new("City", SemanticType::String).required()];
        assert!(table.conform_to(&ok).is_ok());

        let bad = [ColumnSpec::new("Incident Zip", SemanticType::String).required()];
        assert_eq!(
            table.conform_to(&bad),
            Err(ModelError::UnexpectedNull {
                column: "Incident Zip".to_string(),
                row: 1
            })
        );
    }

    #[test]
    fn test_row_and_head() {
        let table = zips();
        let row = table.row(2).unwrap();
        assert_eq!(row, vec![&Value::str("77056"), &Value::str("HOUSTON")]);
        assert!(table.row(3).is_none());
        assert_eq!(table.head(2).row_count(), 2);
    }
}
