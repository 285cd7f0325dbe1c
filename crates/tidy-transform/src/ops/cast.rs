//! Column type conversion.

use chrono::NaiveTime;
use tidy_model::{Column, SemanticType, Table, Value};

use super::{locate, replace_column};
use crate::error::{CleanError, Result};
use crate::normalization::{
    from_unix_seconds, parse_date, parse_datetime, parse_float, parse_integer,
};

/// Convert one cell to `to`, or `None` if the conversion is not defined for it.
///
/// Nulls always convert to null. Strings are parsed; integers become
/// floats or Unix-second timestamps; floats become integers only when they
/// have no fractional part; datetimes drop to their date; and anything can
/// be rendered as a string.
pub fn cast_value(value: &Value, to: SemanticType) -> Option<Value> {
    use SemanticType as T;

    if value.is_null() {
        return Some(Value::Null);
    }
    if value.semantic_type() == Some(to) {
        return Some(value.clone());
    }

    match (value, to) {
        (_, T::String) => Some(Value::Str(value.to_string())),
        (Value::Str(s), T::Integer) => parse_integer(s).map(Value::Int),
        (Value::Str(s), T::Float) => parse_float(s).map(Value::Float),
        (Value::Str(s), T::Date) => parse_date(s).map(Value::Date),
        (Value::Str(s), T::DateTime) => parse_datetime(s).map(Value::DateTime),
        (Value::Int(i), T::Float) => Some(Value::Float(*i as f64)),
        (Value::Int(i), T::DateTime) => from_unix_seconds(*i).map(Value::DateTime),
        (Value::Int(i), T::Date) => from_unix_seconds(*i).map(|dt| Value::Date(dt.date())),
        (Value::Float(f), T::Integer) => float_to_int(*f).map(Value::Int),
        (Value::Date(d), T::DateTime) => Some(Value::DateTime(d.and_time(NaiveTime::MIN))),
        (Value::DateTime(dt), T::Date) => Some(Value::Date(dt.date())),
        _ => None,
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

/// Convert a column to `to`.
///
/// Strict casts fail on the first unconvertible cell with `CastError`
/// carrying its zero-based row index and display text. Lenient casts turn
/// such cells into nulls instead. Casting to the column's current type
/// returns the table unchanged.
pub fn cast_column(table: &Table, column: &str, to: SemanticType, lenient: bool) -> Result<Table> {
    let (idx, source) = locate(table, column)?;
    if source.dtype() == to {
        return Ok(table.clone());
    }

    let mut nulled = 0usize;
    let mut values = Vec::with_capacity(source.len());
    for (row, value) in source.values().iter().enumerate() {
        match cast_value(value, to) {
            Some(cast) => values.push(cast),
            None if lenient => {
                nulled += 1;
                values.push(Value::Null);
            }
            None => {
                return Err(CleanError::CastError {
                    column: column.to_string(),
                    row,
                    value: value.to_string(),
                    target: to,
                });
            }
        }
    }

    if nulled > 0 {
        tracing::warn!(column, target = %to, nulled, "lenient cast replaced unparseable cells with null");
    }
    tracing::debug!(column, from = %source.dtype(), to = %to, "cast column");
    replace_column(table, idx, Column::new(column, to, values)?)
}
