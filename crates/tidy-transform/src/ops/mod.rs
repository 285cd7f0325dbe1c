//! Table-level cleaning operations.
//!
//! Every operation borrows its input and returns a new [`Table`]; the input
//! is never modified. Column lookups are exact and fail with
//! `UnknownColumn` before any cell is touched.

mod cast;
mod columns;
mod partition;
mod values;

pub use cast::{cast_column, cast_value};
pub use columns::{
    drop_column, drop_incomplete_columns, lowercase_names, rename_column, select_columns,
};
pub use partition::{classify_and_filter, filter_rows};
pub use values::{
    blank_to_null, fill_null, normalize_nulls, strip_encoding_artifacts, truncate_strings,
    uppercase,
};

pub(crate) use values::truncate_strings_except;

use tidy_model::{Column, SemanticType, Table};

use crate::error::{CleanError, Result};

/// Position and column for `name`, or `UnknownColumn`.
fn locate<'a>(table: &'a Table, name: &str) -> Result<(usize, &'a Column)> {
    let idx = table
        .column_index(name)
        .ok_or_else(|| CleanError::UnknownColumn {
            column: name.to_string(),
        })?;
    Ok((idx, &table.columns()[idx]))
}

/// Like [`locate`], but the column must hold strings.
fn locate_strings<'a>(
    table: &'a Table,
    name: &str,
    operation: &'static str,
) -> Result<(usize, &'a Column)> {
    let (idx, column) = locate(table, name)?;
    if column.dtype() != SemanticType::String {
        return Err(CleanError::ColumnType {
            column: name.to_string(),
            operation,
            found: column.dtype(),
        });
    }
    Ok((idx, column))
}

/// Copy of `table` with the column at `idx` replaced.
fn replace_column(table: &Table, idx: usize, column: Column) -> Result<Table> {
    let mut columns = table.columns().to_vec();
    columns[idx] = column;
    Ok(Table::new(columns)?)
}
