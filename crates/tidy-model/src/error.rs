//! Error types for the table model.

use thiserror::Error;

use crate::schema::SemanticType;

/// Errors raised when a table or column would violate its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Column name not present in the table.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// Two columns would share the same name.
    #[error("duplicate column name '{column}'")]
    DuplicateColumnName { column: String },

    /// A column's length differs from the table's row count.
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A cell does not hold a value of the column's declared type.
    #[error("column '{column}' row {row}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: SemanticType,
        found: SemanticType,
    },

    /// A non-nullable column contains a null.
    #[error("column '{column}' row {row} is null but the column is not nullable")]
    UnexpectedNull { column: String, row: usize },

    /// Two tables cannot be stacked.
    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
