//! Grouping and aggregation over cleaned tables.
//!
//! These produce small summary tables ready for a [`tidy_model::Renderer`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use tidy_model::{Column, SemanticType, Table, Value};

use crate::error::{CleanError, Result};

/// Name of the count column produced by [`value_counts`].
pub const COUNT_COLUMN: &str = "count";

/// How rows are assigned to groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// The grouping column's own values.
    #[default]
    Column,
    /// Hour of day (0-23) of a datetime column.
    Hour,
    /// Day of week of a date or datetime column, 0 for Monday.
    Weekday,
    /// First day of the month of a date or datetime column.
    Month,
}

impl GroupKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Hour => "hour",
            Self::Weekday => "weekday",
            Self::Month => "month",
        }
    }

    fn derive(self, value: &Value) -> Option<Value> {
        match self {
            Self::Column => (!value.is_null()).then(|| value.clone()),
            Self::Hour => value.as_datetime().map(|dt| Value::Int(i64::from(dt.hour()))),
            Self::Weekday => temporal_date(value)
                .map(|d| Value::Int(i64::from(d.weekday().num_days_from_monday()))),
            Self::Month => temporal_date(value)
                .and_then(|d| d.with_day(1))
                .map(Value::Date),
        }
    }

    fn output_type(self, source: SemanticType) -> SemanticType {
        match self {
            Self::Column => source,
            Self::Hour | Self::Weekday => SemanticType::Integer,
            Self::Month => SemanticType::Date,
        }
    }

    fn accepts(self, source: SemanticType) -> bool {
        match self {
            Self::Column => true,
            Self::Hour => source == SemanticType::DateTime,
            Self::Weekday | Self::Month => source.is_temporal(),
        }
    }
}

fn temporal_date(value: &Value) -> Option<chrono::NaiveDate> {
    value.as_date().or_else(|| value.as_datetime().map(|dt| dt.date()))
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "column" | "value" => Ok(Self::Column),
            "hour" => Ok(Self::Hour),
            "weekday" | "day_of_week" => Ok(Self::Weekday),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown group key '{other}'")),
        }
    }
}

/// Reduction applied to each group's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Number of non-null values.
    Count,
    Sum,
    Mean,
    #[default]
    Median,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    fn output_type(self) -> SemanticType {
        match self {
            Self::Count => SemanticType::Integer,
            _ => SemanticType::Float,
        }
    }

    fn reduce(self, values: &mut [f64], non_null: usize) -> Value {
        let result = match self {
            Self::Count => return Value::Int(i64::try_from(non_null).unwrap_or(i64::MAX)),
            Self::Sum => values.iter().sum(),
            _ if values.is_empty() => return Value::Null,
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Self::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        Value::Float(result)
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "sum" => Ok(Self::Sum),
            "mean" | "avg" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(format!("unknown aggregation '{other}'")),
        }
    }
}

/// A [`Value`] usable as an ordered map key.
#[derive(Debug, Clone)]
struct OrdValue(Value);

impl PartialEq for OrdValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdValue {}

impl PartialOrd for OrdValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Count occurrences of each distinct non-null value in `column`.
///
/// The result has the original column (same type) and an integer
/// [`COUNT_COLUMN`], sorted by count descending, ties by value ascending.
pub fn value_counts(table: &Table, column: &str) -> Result<Table> {
    let source = table.column(column)?;
    let mut counts: BTreeMap<OrdValue, i64> = BTreeMap::new();
    for value in source.values().iter().filter(|v| !v.is_null()) {
        *counts.entry(OrdValue(value.clone())).or_default() += 1;
    }

    let mut rows: Vec<(Value, i64)> = counts.into_iter().map(|(k, n)| (k.0, n)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let (keys, counts): (Vec<Value>, Vec<Value>) =
        rows.into_iter().map(|(k, n)| (k, Value::Int(n))).unzip();
    Ok(Table::new(vec![
        Column::new(column, source.dtype(), keys)?,
        Column::new(COUNT_COLUMN, SemanticType::Integer, counts)?,
    ])?)
}

/// Group rows of `table` by `by` (through `key`) and reduce `value` per group.
///
/// Rows whose key is null are skipped. The output holds one row per group,
/// sorted by key, with the key column (named after `by` for
/// [`GroupKey::Column`], else after the key itself) and the aggregated
/// `value` column. `Count` yields integers and works on any column; other
/// aggregations need a numeric `value` column and yield floats.
pub fn group_by(
    table: &Table,
    by: &str,
    key: GroupKey,
    value: &str,
    aggregation: Aggregation,
) -> Result<Table> {
    let keys = table.column(by)?;
    let values = table.column(value)?;

    if !key.accepts(keys.dtype()) {
        return Err(CleanError::ColumnType {
            column: by.to_string(),
            operation: "group by",
            found: keys.dtype(),
        });
    }
    if aggregation != Aggregation::Count && !values.dtype().is_numeric() {
        return Err(CleanError::ColumnType {
            column: value.to_string(),
            operation: "numeric aggregation",
            found: values.dtype(),
        });
    }

    let mut groups: BTreeMap<OrdValue, (Vec<f64>, usize)> = BTreeMap::new();
    let mut skipped = 0usize;
    for (k, v) in keys.values().iter().zip(values.values()) {
        let Some(group) = key.derive(k) else {
            skipped += 1;
            continue;
        };
        let entry = groups.entry(OrdValue(group)).or_default();
        if !v.is_null() {
            entry.1 += 1;
            if let Some(x) = v.as_f64() {
                entry.0.push(x);
            }
        }
    }
    if skipped > 0 {
        tracing::debug!(column = by, skipped, "skipped rows with null group key");
    }

    let key_name = match key {
        GroupKey::Column => by.to_string(),
        other => other.as_str().to_string(),
    };
    let mut out_keys = Vec::with_capacity(groups.len());
    let mut out_values = Vec::with_capacity(groups.len());
    for (group, (mut numbers, non_null)) in groups {
        out_keys.push(group.0);
        out_values.push(aggregation.reduce(&mut numbers, non_null));
    }

    tracing::debug!(
        by,
        key = %key,
        value,
        aggregation = %aggregation,
        groups = out_keys.len(),
        "grouped table"
    );
    Ok(Table::new(vec![
        Column::new(key_name, key.output_type(keys.dtype()), out_keys)?,
        Column::new(value, aggregation.output_type(), out_values)?,
    ])?)
}
