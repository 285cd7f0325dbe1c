//! Row partitioning by predicate.

use tidy_model::Table;

use crate::error::Result;
use crate::predicate::Predicate;

/// Split rows into those matching `predicate` and those that don't.
///
/// Both halves keep every column and the original row order. Each row
/// lands in exactly one half.
pub fn classify_and_filter(table: &Table, predicate: &Predicate) -> Result<(Table, Table)> {
    let bound = predicate.bind(table)?;
    let (matching, rest): (Vec<usize>, Vec<usize>) =
        (0..table.row_count()).partition(|&row| bound.matches(row));

    tracing::debug!(
        matching = matching.len(),
        non_matching = rest.len(),
        "partitioned rows"
    );
    Ok((table.take_rows(&matching), table.take_rows(&rest)))
}

/// Keep only the rows matching `predicate`.
pub fn filter_rows(table: &Table, predicate: &Predicate) -> Result<Table> {
    let bound = predicate.bind(table)?;
    let rows: Vec<usize> = (0..table.row_count())
        .filter(|&row| bound.matches(row))
        .collect();
    Ok(table.take_rows(&rows))
}
