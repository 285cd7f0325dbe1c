//! Ordered rule application.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tidy_model::Table;

use crate::error::Result;
use crate::ops;
use crate::rules::CleaningRule;

/// An ordered list of [`CleaningRule`]s applied as one pipeline.
///
/// The cleaner holds no state between runs; the same instance can clean
/// any number of tables, from any number of threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableCleaner {
    rules: Vec<CleaningRule>,
}

impl TableCleaner {
    pub fn new(rules: Vec<CleaningRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CleaningRule] {
        &self.rules
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: CleaningRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Run every rule in order. See [`apply`].
    pub fn apply(&self, table: &Table) -> Result<Table> {
        apply(table, &self.rules)
    }
}

/// Apply `rules` to `table` in order and return the cleaned table.
///
/// The first failing rule aborts the run and its error is returned; `table`
/// itself is never modified. A `truncate` rule leaves cells alone that a
/// later `map_null_sentinel` rule on the same column will null, so sentinel
/// detection always wins over truncation regardless of rule order.
pub fn apply(table: &Table, rules: &[CleaningRule]) -> Result<Table> {
    let span = tracing::info_span!(
        "clean",
        rules = rules.len(),
        rows = table.row_count(),
        columns = table.column_count()
    );
    let _guard = span.enter();

    let mut current: Option<Table> = None;
    for (step, rule) in rules.iter().enumerate() {
        let input = current.as_ref().unwrap_or(table);
        let next = match rule {
            CleaningRule::Truncate { column, max_len } => {
                let protected = later_sentinels(&rules[step + 1..], column);
                ops::truncate_strings_except(input, column, *max_len, &protected)
            }
            other => apply_rule(input, other),
        }
        .inspect_err(|err| tracing::error!(step, rule = %rule, error = %err, "rule failed"))?;

        tracing::debug!(
            step,
            rule = %rule,
            rows = next.row_count(),
            columns = next.column_count(),
            "applied rule"
        );
        current = Some(next);
    }

    let cleaned = current.unwrap_or_else(|| table.clone());
    tracing::info!(
        rows = cleaned.row_count(),
        columns = cleaned.column_count(),
        "cleaning complete"
    );
    Ok(cleaned)
}

/// Apply a single rule on its own.
pub fn apply_rule(table: &Table, rule: &CleaningRule) -> Result<Table> {
    match rule {
        CleaningRule::Rename { from, to } => ops::rename_column(table, from, to),
        CleaningRule::Drop { column } => ops::drop_column(table, column),
        CleaningRule::Truncate { column, max_len } => ops::truncate_strings(table, column, *max_len),
        CleaningRule::MapNullSentinel { column, sentinels } => {
            let sentinels: Vec<&str> = sentinels.iter().map(String::as_str).collect();
            ops::normalize_nulls(table, column, &sentinels)
        }
        CleaningRule::Cast {
            column,
            to,
            lenient,
        } => ops::cast_column(table, column, *to, *lenient),
        CleaningRule::StripEncodingArtifacts => ops::strip_encoding_artifacts(table),
        CleaningRule::BlankToNull => ops::blank_to_null(table),
        CleaningRule::DropIncompleteColumns => ops::drop_incomplete_columns(table),
        CleaningRule::LowercaseNames => ops::lowercase_names(table),
        CleaningRule::Uppercase { column } => ops::uppercase(table, column),
        CleaningRule::FillNull { column, value } => ops::fill_null(table, column, value),
        CleaningRule::Select { columns } => ops::select_columns(table, columns.as_slice()),
        CleaningRule::Filter { predicate } => ops::filter_rows(table, predicate),
    }
}

/// Sentinels that later rules will map to null in `column`.
///
/// Scanning stops at the first rule that may rename the column or rewrite
/// its non-null cells, since a protected cell would then no longer match.
fn later_sentinels<'a>(rules: &'a [CleaningRule], column: &str) -> HashSet<&'a str> {
    let mut protected = HashSet::new();
    for rule in rules {
        match rule {
            CleaningRule::MapNullSentinel {
                column: target,
                sentinels,
            } if target == column => protected.extend(sentinels.iter().map(String::as_str)),
            rule if rewrites_column(rule, column) => break,
            _ => {}
        }
    }
    protected
}

/// True if `rule` can change the name of `column` or the text of its non-null cells.
fn rewrites_column(rule: &CleaningRule, column: &str) -> bool {
    match rule {
        CleaningRule::Rename { from: target, .. }
        | CleaningRule::Drop { column: target }
        | CleaningRule::Cast { column: target, .. }
        | CleaningRule::Uppercase { column: target }
        | CleaningRule::FillNull { column: target, .. } => target == column,
        CleaningRule::StripEncodingArtifacts
        | CleaningRule::LowercaseNames
        | CleaningRule::Select { .. }
        | CleaningRule::DropIncompleteColumns => true,
        CleaningRule::Truncate { .. }
        | CleaningRule::MapNullSentinel { .. }
        | CleaningRule::BlankToNull
        | CleaningRule::Filter { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use tidy_model::{Column, SemanticType, Value};

    use super::*;
    use crate::error::CleanError;

    fn zips() -> Table {
        Table::new(vec![Column::from_strings(
            "Incident Zip",
            [
                Some("10001"),
                Some("29616-0759"),
                Some("83"),
                Some("NO CLUE"),
                Some("00000"),
            ],
        )])
        .unwrap()
    }

    fn zip_cells(table: &Table) -> Vec<Option<&str>> {
        table
            .column("Incident Zip")
            .unwrap()
            .values()
            .iter()
            .map(Value::as_str)
            .collect()
    }

    #[test]
    fn test_empty_rule_list_returns_input() {
        let table = zips();
        assert_eq!(TableCleaner::default().apply(&table).unwrap(), table);
    }

    #[test]
    fn test_sentinel_before_truncate() {
        let cleaner = TableCleaner::new(vec![
            CleaningRule::map_null_sentinel("Incident Zip", ["NO CLUE", "0"]),
            CleaningRule::truncate("Incident Zip", 5),
        ]);
        let out = cleaner.apply(&zips()).unwrap();
        assert_eq!(
            zip_cells(&out),
            vec![Some("10001"), Some("29616"), Some("83"), None, Some("00000")]
        );
    }

    #[test]
    fn test_truncate_before_sentinel_still_nulls_sentinel() {
        let cleaner = TableCleaner::new(vec![
            CleaningRule::truncate("Incident Zip", 5),
            CleaningRule::map_null_sentinel("Incident Zip", ["NO CLUE", "0"]),
        ]);
        let out = cleaner.apply(&zips()).unwrap();
        assert_eq!(
            zip_cells(&out),
            vec![Some("10001"), Some("29616"), Some("83"), None, Some("00000")]
        );
    }

    #[test]
    fn test_protection_stops_at_rename() {
        let rules = vec![
            CleaningRule::truncate("Incident Zip", 5),
            CleaningRule::rename("Incident Zip", "zip"),
            CleaningRule::map_null_sentinel("Incident Zip", ["NO CLUE"]),
        ];
        assert!(later_sentinels(&rules[1..], "Incident Zip").is_empty());
    }

    #[test]
    fn test_protection_stops_at_cell_rewrite() {
        let table = Table::new(vec![Column::from_strings(
            "Incident Zip",
            [Some("n/a zip"), Some("29616-0759")],
        )])
        .unwrap();
        let cleaner = TableCleaner::new(vec![
            CleaningRule::truncate("Incident Zip", 5),
            CleaningRule::uppercase("Incident Zip"),
            CleaningRule::map_null_sentinel("Incident Zip", ["n/a zip"]),
        ]);
        let out = cleaner.apply(&table).unwrap();
        assert_eq!(zip_cells(&out), vec![Some("N/A Z"), Some("29616")]);
    }

    #[test]
    fn test_protection_survives_unrelated_rules() {
        let rules = vec![
            CleaningRule::uppercase("City"),
            CleaningRule::BlankToNull,
            CleaningRule::filter(crate::Predicate::is_null("City").negate()),
            CleaningRule::map_null_sentinel("Incident Zip", ["NO CLUE"]),
            CleaningRule::cast("Incident Zip", SemanticType::Integer),
            CleaningRule::map_null_sentinel("Incident Zip", ["0"]),
        ];
        assert_eq!(
            later_sentinels(&rules, "Incident Zip"),
            HashSet::from(["NO CLUE"])
        );
    }

    #[test]
    fn test_failure_leaves_input_untouched() {
        let table = zips();
        let cleaner = TableCleaner::new(vec![
            CleaningRule::truncate("Incident Zip", 2),
            CleaningRule::cast("Incident Zip", SemanticType::Integer),
        ]);
        assert!(matches!(
            cleaner.apply(&table),
            Err(CleanError::CastError { row: 3, .. })
        ));
        assert_eq!(table, zips());
    }

    #[test]
    fn test_cleaner_serializes_as_rule_list() {
        let cleaner = TableCleaner::default().with_rule(CleaningRule::BlankToNull);
        let json = serde_json::to_string(&cleaner).unwrap();
        assert_eq!(json, r#"[{"rule":"blank_to_null"}]"#);
    }
}
