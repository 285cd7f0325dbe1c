//! Column-level operations: naming and selection.

use tidy_model::{Column, Table};

use super::{locate, replace_column};
use crate::error::{CleanError, Result};

/// Rename `from` to `to`, keeping the column's position.
///
/// Renaming a column to its own name is a no-op.
pub fn rename_column(table: &Table, from: &str, to: &str) -> Result<Table> {
    let (idx, column) = locate(table, from)?;
    if from == to {
        return Ok(table.clone());
    }
    if table.has_column(to) {
        return Err(CleanError::DuplicateColumnName {
            column: to.to_string(),
        });
    }
    replace_column(table, idx, column.clone().renamed(to))
}

/// Remove one column.
pub fn drop_column(table: &Table, column: &str) -> Result<Table> {
    let (idx, _) = locate(table, column)?;
    let columns = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, c)| c.clone())
        .collect();
    Ok(Table::new(columns)?)
}

/// Keep only `names`, in the given order.
pub fn select_columns<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    Ok(table.select(names)?)
}

/// Lowercase every column name.
pub fn lowercase_names(table: &Table) -> Result<Table> {
    let columns = table
        .columns()
        .iter()
        .map(|c| {
            let lower = c.name().to_lowercase();
            c.clone().renamed(lower)
        })
        .collect();
    Ok(Table::new(columns)?)
}

/// Remove every column that contains at least one null.
pub fn drop_incomplete_columns(table: &Table) -> Result<Table> {
    let (kept, dropped): (Vec<&Column>, Vec<&Column>) =
        table.columns().iter().partition(|c| c.null_count() == 0);
    if !dropped.is_empty() {
        tracing::debug!(
            dropped = ?dropped.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "dropped incomplete columns"
        );
    }
    Ok(Table::new(kept.into_iter().cloned().collect())?)
}
