//! Declarative cleaning rules.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tidy_model::SemanticType;

use crate::predicate::Predicate;

/// One cleaning step.
///
/// Rules are applied in list order by [`crate::TableCleaner`]. Value-level
/// rules are idempotent: applying one to a table that already satisfies it
/// returns an equal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CleaningRule {
    /// Rename a column.
    Rename { from: String, to: String },

    /// Remove a column.
    Drop { column: String },

    /// Cut string cells to at most `max_len` characters.
    Truncate { column: String, max_len: usize },

    /// Replace cells equal to any sentinel with null.
    MapNullSentinel {
        column: String,
        sentinels: BTreeSet<String>,
    },

    /// Convert a column to another semantic type.
    ///
    /// With `lenient`, unparseable cells become null instead of failing.
    Cast {
        column: String,
        to: SemanticType,
        #[serde(default)]
        lenient: bool,
    },

    /// Repair misread UTF-8 in column names and string cells.
    StripEncodingArtifacts,

    /// Turn empty or whitespace-only string cells into nulls, in every string column.
    BlankToNull,

    /// Remove every column that holds at least one null.
    DropIncompleteColumns,

    /// Lowercase every column name.
    LowercaseNames,

    /// Uppercase the string cells of a column.
    Uppercase { column: String },

    /// Replace nulls in a column with a fixed value.
    FillNull { column: String, value: String },

    /// Keep only the listed columns, in the listed order.
    Select { columns: Vec<String> },

    /// Keep only rows matching the predicate.
    Filter { predicate: Predicate },
}

impl CleaningRule {
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn drop(column: impl Into<String>) -> Self {
        Self::Drop {
            column: column.into(),
        }
    }

    pub fn truncate(column: impl Into<String>, max_len: usize) -> Self {
        Self::Truncate {
            column: column.into(),
            max_len,
        }
    }

    pub fn map_null_sentinel<S: Into<String>>(
        column: impl Into<String>,
        sentinels: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::MapNullSentinel {
            column: column.into(),
            sentinels: sentinels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn cast(column: impl Into<String>, to: SemanticType) -> Self {
        Self::Cast {
            column: column.into(),
            to,
            lenient: false,
        }
    }

    pub fn cast_lenient(column: impl Into<String>, to: SemanticType) -> Self {
        Self::Cast {
            column: column.into(),
            to,
            lenient: true,
        }
    }

    pub fn uppercase(column: impl Into<String>) -> Self {
        Self::Uppercase {
            column: column.into(),
        }
    }

    pub fn fill_null(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FillNull {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn select<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::Select {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn filter(predicate: Predicate) -> Self {
        Self::Filter { predicate }
    }

    /// Short rule name as used in config files.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rename { .. } => "rename",
            Self::Drop { .. } => "drop",
            Self::Truncate { .. } => "truncate",
            Self::MapNullSentinel { .. } => "map_null_sentinel",
            Self::Cast { .. } => "cast",
            Self::StripEncodingArtifacts => "strip_encoding_artifacts",
            Self::BlankToNull => "blank_to_null",
            Self::DropIncompleteColumns => "drop_incomplete_columns",
            Self::LowercaseNames => "lowercase_names",
            Self::Uppercase { .. } => "uppercase",
            Self::FillNull { .. } => "fill_null",
            Self::Select { .. } => "select",
            Self::Filter { .. } => "filter",
        }
    }

    /// Columns the rule requires to exist when it runs.
    pub fn referenced_columns(&self) -> Vec<&str> {
        match self {
            Self::Rename { from, .. } => vec![from.as_str()],
            Self::Drop { column }
            | Self::Truncate { column, .. }
            | Self::MapNullSentinel { column, .. }
            | Self::Cast { column, .. }
            | Self::Uppercase { column }
            | Self::FillNull { column, .. } => vec![column.as_str()],
            Self::Select { columns } => columns.iter().map(String::as_str).collect(),
            Self::Filter { predicate } => predicate.referenced_columns(),
            Self::StripEncodingArtifacts
            | Self::BlankToNull
            | Self::DropIncompleteColumns
            | Self::LowercaseNames => Vec::new(),
        }
    }

    /// Returns false only for rules that can remove rows.
    pub fn preserves_row_count(&self) -> bool {
        !matches!(self, Self::Filter { .. })
    }
}

impl fmt::Display for CleaningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename { from, to } => write!(f, "rename '{from}' to '{to}'"),
            Self::Drop { column } => write!(f, "drop '{column}'"),
            Self::Truncate { column, max_len } => {
                write!(f, "truncate '{column}' to {max_len} characters")
            }
            Self::MapNullSentinel { column, sentinels } => {
                let list: Vec<String> = sentinels.iter().map(|s| format!("{s:?}")).collect();
                write!(f, "map [{}] to null in '{column}'", list.join(", "))
            }
            Self::Cast { column, to, lenient } => {
                let mode = if *lenient { " (lenient)" } else { "" };
                write!(f, "cast '{column}' to {to}{mode}")
            }
            Self::StripEncodingArtifacts => f.write_str("strip encoding artifacts"),
            Self::BlankToNull => f.write_str("map blank strings to null"),
            Self::DropIncompleteColumns => f.write_str("drop columns containing nulls"),
            Self::LowercaseNames => f.write_str("lowercase column names"),
            Self::Uppercase { column } => write!(f, "uppercase '{column}'"),
            Self::FillNull { column, value } => write!(f, "fill nulls in '{column}' with {value:?}"),
            Self::Select { columns } => write!(f, "select [{}]", columns.join(", ")),
            Self::Filter { predicate } => {
                write!(f, "filter rows on [{}]", predicate.referenced_columns().join(", "))
            }
        }
    }
}
