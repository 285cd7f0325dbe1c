//! Polars `AnyValue` and `DataFrame` conversion.

use polars::prelude::{AnyValue, DataFrame, DataType, PolarsError};
use thiserror::Error;
use tidy_model::{Column, ModelError, SemanticType, Table, Value};

/// Converts a Polars `AnyValue` into a table cell.
///
/// Integers widen to `i64` (unsigned values beyond `i64::MAX` become floats),
/// booleans become `"true"`/`"false"` strings, and any other type falls back
/// to its display text without surrounding quotes.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::any_to_value;
/// use tidy_model::Value;
///
/// assert_eq!(any_to_value(AnyValue::Null), Value::Null);
/// assert_eq!(any_to_value(AnyValue::Int32(42)), Value::Int(42));
/// assert_eq!(any_to_value(AnyValue::String("83")), Value::str("83"));
/// ```
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int8(v) => Value::Int(i64::from(v)),
        AnyValue::Int16(v) => Value::Int(i64::from(v)),
        AnyValue::Int32(v) => Value::Int(i64::from(v)),
        AnyValue::Int64(v) => Value::Int(v),
        AnyValue::UInt8(v) => Value::Int(i64::from(v)),
        AnyValue::UInt16(v) => Value::Int(i64::from(v)),
        AnyValue::UInt32(v) => Value::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
        AnyValue::Float32(v) => Value::Float(f64::from(v)),
        AnyValue::Float64(v) => Value::Float(v),
        AnyValue::String(s) => Value::str(s),
        AnyValue::StringOwned(s) => Value::str(s.as_str()),
        AnyValue::Boolean(b) => Value::str(b.to_string()),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                Value::str(&s[1..s.len() - 1])
            } else {
                Value::Str(s)
            }
        }
    }
}

/// Semantic type a Polars column maps onto.
///
/// Integer and float dtypes keep their numeric meaning; everything else
/// is carried as text and typed later by explicit cast rules.
pub fn semantic_type_of(dtype: &DataType) -> SemanticType {
    if dtype.is_integer() {
        SemanticType::Integer
    } else if dtype.is_float() {
        SemanticType::Float
    } else {
        SemanticType::String
    }
}

/// Failure while converting a Polars frame into a [`Table`].
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Reading a cell from Polars failed.
    #[error("polars conversion failed: {0}")]
    Polars(#[from] PolarsError),

    /// The converted columns do not form a valid table.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Convert one Polars column.
pub fn column_from_polars(column: &polars::prelude::Column) -> Result<Column, ConversionError> {
    let dtype = semantic_type_of(column.dtype());
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = any_to_value(column.get(idx)?);
        values.push(coerce(value, dtype));
    }
    Ok(Column::new(column.name().as_str(), dtype, values)?)
}

/// Convert a whole `DataFrame` into a [`Table`].
pub fn table_from_dataframe(df: &DataFrame) -> Result<Table, ConversionError> {
    let columns = df
        .get_columns()
        .iter()
        .map(column_from_polars)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Table::new(columns)?)
}

/// Force a converted cell into the column's semantic type.
fn coerce(value: Value, dtype: SemanticType) -> Value {
    match (dtype, value) {
        (_, Value::Null) => Value::Null,
        (SemanticType::Integer, v @ Value::Int(_)) => v,
        (SemanticType::Float, v @ Value::Float(_)) => v,
        (SemanticType::Float, Value::Int(v)) => Value::Float(v as f64),
        (SemanticType::String, v @ Value::Str(_)) => v,
        (_, other) => Value::Str(other.to_string()),
    }
}
