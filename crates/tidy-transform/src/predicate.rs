//! Row predicates used by partition and filter steps.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tidy_model::{Column, Table, Value};

use crate::error::{CleanError, Result};
use crate::ops::cast_value;

/// A boolean test over one or more columns of a row.
///
/// Text tests compare a cell's display text, so they also work on numeric
/// and date columns. Ordered tests parse their threshold as the column's
/// type and compare typed values. Null cells never satisfy either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Cell text starts with any of the prefixes.
    StartsWith { column: String, prefixes: Vec<String> },
    /// Cell text contains the needle.
    Contains { column: String, needle: String },
    /// Cell text equals the value exactly.
    Equals { column: String, value: String },
    /// Cell is null.
    IsNull { column: String },
    /// Cell text has more than `len` characters.
    LongerThan { column: String, len: usize },
    /// Cell is strictly greater than the threshold.
    GreaterThan { column: String, value: String },
    /// Cell is strictly less than the threshold.
    LessThan { column: String, value: String },
    Not { predicate: Box<Predicate> },
    All { predicates: Vec<Predicate> },
    Any { predicates: Vec<Predicate> },
}

impl Predicate {
    pub fn starts_with<S: Into<String>>(
        column: impl Into<String>,
        prefixes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::StartsWith {
            column: column.into(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            column: column.into(),
            needle: needle.into(),
        }
    }

    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
        }
    }

    pub fn longer_than(column: impl Into<String>, len: usize) -> Self {
        Self::LongerThan {
            column: column.into(),
            len,
        }
    }

    pub fn greater_than(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::GreaterThan {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn less_than(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::LessThan {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Logical negation.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not {
            predicate: Box::new(self),
        }
    }

    /// Both predicates must hold.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::All {
            predicates: vec![self, other],
        }
    }

    /// Either predicate must hold.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Any {
            predicates: vec![self, other],
        }
    }

    /// Every column name the predicate reads.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::StartsWith { column, .. }
            | Self::Contains { column, .. }
            | Self::Equals { column, .. }
            | Self::IsNull { column }
            | Self::LongerThan { column, .. }
            | Self::GreaterThan { column, .. }
            | Self::LessThan { column, .. } => out.push(column),
            Self::Not { predicate } => predicate.collect_columns(out),
            Self::All { predicates } | Self::Any { predicates } => {
                for p in predicates {
                    p.collect_columns(out);
                }
            }
        }
    }

    /// Resolve column names against `table`.
    ///
    /// Fails with `UnknownColumn` before any row is evaluated, or with
    /// `InvalidRule` when an ordered threshold does not parse as the
    /// column's type.
    pub fn bind<'a>(&'a self, table: &'a Table) -> Result<BoundPredicate<'a>> {
        Ok(match self {
            Self::StartsWith { column, prefixes } => BoundPredicate::StartsWith {
                column: table.column(column)?,
                prefixes,
            },
            Self::Contains { column, needle } => BoundPredicate::Contains {
                column: table.column(column)?,
                needle,
            },
            Self::Equals { column, value } => BoundPredicate::Equals {
                column: table.column(column)?,
                value,
            },
            Self::IsNull { column } => BoundPredicate::IsNull {
                column: table.column(column)?,
            },
            Self::LongerThan { column, len } => BoundPredicate::LongerThan {
                column: table.column(column)?,
                len: *len,
            },
            Self::GreaterThan { column, value } => {
                let (column, threshold) = bind_threshold(table, column, value)?;
                BoundPredicate::Compare {
                    column,
                    threshold,
                    wanted: Ordering::Greater,
                }
            }
            Self::LessThan { column, value } => {
                let (column, threshold) = bind_threshold(table, column, value)?;
                BoundPredicate::Compare {
                    column,
                    threshold,
                    wanted: Ordering::Less,
                }
            }
            Self::Not { predicate } => BoundPredicate::Not(Box::new(predicate.bind(table)?)),
            Self::All { predicates } => BoundPredicate::All(
                predicates
                    .iter()
                    .map(|p| p.bind(table))
                    .collect::<Result<_>>()?,
            ),
            Self::Any { predicates } => BoundPredicate::Any(
                predicates
                    .iter()
                    .map(|p| p.bind(table))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

/// Look up `name` and parse `value` as that column's type.
fn bind_threshold<'a>(table: &'a Table, name: &str, value: &str) -> Result<(&'a Column, Value)> {
    let column = table.column(name)?;
    match cast_value(&Value::str(value), column.dtype()) {
        Some(threshold) if !threshold.is_null() => Ok((column, threshold)),
        _ => Err(CleanError::InvalidRule {
            reason: format!(
                "threshold {value:?} is not a valid {} for column '{name}'",
                column.dtype()
            ),
        }),
    }
}

/// A predicate whose columns have been looked up in a specific table.
#[derive(Debug)]
pub enum BoundPredicate<'a> {
    StartsWith {
        column: &'a Column,
        prefixes: &'a [String],
    },
    Contains {
        column: &'a Column,
        needle: &'a str,
    },
    Equals {
        column: &'a Column,
        value: &'a str,
    },
    IsNull {
        column: &'a Column,
    },
    LongerThan {
        column: &'a Column,
        len: usize,
    },
    Compare {
        column: &'a Column,
        threshold: Value,
        wanted: Ordering,
    },
    Not(Box<BoundPredicate<'a>>),
    All(Vec<BoundPredicate<'a>>),
    Any(Vec<BoundPredicate<'a>>),
}

impl BoundPredicate<'_> {
    /// Evaluate the predicate for one row.
    pub fn matches(&self, row: usize) -> bool {
        match self {
            Self::StartsWith { column, prefixes } => cell_text(column, row)
                .is_some_and(|text| prefixes.iter().any(|p| text.starts_with(p.as_str()))),
            Self::Contains { column, needle } => {
                cell_text(column, row).is_some_and(|text| text.contains(needle))
            }
            Self::Equals { column, value } => {
                cell_text(column, row).is_some_and(|text| text == *value)
            }
            Self::IsNull { column } => column.get(row).is_none_or(Value::is_null),
            Self::LongerThan { column, len } => {
                cell_text(column, row).is_some_and(|text| text.chars().count() > *len)
            }
            Self::Compare {
                column,
                threshold,
                wanted,
            } => column
                .get(row)
                .is_some_and(|cell| !cell.is_null() && cell.total_cmp(threshold) == *wanted),
            Self::Not(inner) => !inner.matches(row),
            Self::All(inner) => inner.iter().all(|p| p.matches(row)),
            Self::Any(inner) => inner.iter().any(|p| p.matches(row)),
        }
    }
}

/// Display text of a cell, `None` for nulls.
fn cell_text(column: &Column, row: usize) -> Option<Cow<'_, str>> {
    match column.get(row)? {
        Value::Null => None,
        Value::Str(s) => Some(Cow::Borrowed(s)),
        other => Some(Cow::Owned(other.to_string())),
    }
}
