//! Error types for table cleaning.

use thiserror::Error;
use tidy_model::{ModelError, SemanticType};

/// Errors raised by cleaning rules, predicates and aggregations.
///
/// Every error is detected before the offending rule produces any output,
/// so a failed rule never leaves a partially cleaned table behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// A rule references a column that is not in the table.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A rule would produce two columns with the same name.
    #[error("duplicate column name '{column}'")]
    DuplicateColumnName { column: String },

    /// A cell could not be parsed as the cast target.
    #[error("cannot cast value '{value}' in column '{column}' row {row} to {target}")]
    CastError {
        column: String,
        row: usize,
        value: String,
        target: SemanticType,
    },

    /// The operation does not apply to the column's type.
    #[error("{operation} cannot be applied to {found} column '{column}'")]
    ColumnType {
        column: String,
        operation: &'static str,
        found: SemanticType,
    },

    /// A rule's parameters are unusable.
    #[error("invalid rule: {reason}")]
    InvalidRule { reason: String },

    /// Any other table invariant violation.
    #[error(transparent)]
    Model(ModelError),
}

impl From<ModelError> for CleanError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownColumn { column } => Self::UnknownColumn { column },
            ModelError::DuplicateColumnName { column } => Self::DuplicateColumnName { column },
            other => Self::Model(other),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_keep_their_kind() {
        let err: CleanError = ModelError::UnknownColumn {
            column: "Borough ".to_string(),
        }
        .into();
        assert_eq!(
            err,
            CleanError::UnknownColumn {
                column: "Borough ".to_string()
            }
        );

        let err: CleanError = ModelError::SchemaMismatch {
            reason: "x".to_string(),
        }
        .into();
        assert!(matches!(err, CleanError::Model(_)));
    }

    #[test]
    fn test_cast_error_display() {
        let err = CleanError::CastError {
            column: "Number of Requests".to_string(),
            row: 4,
            value: "many".to_string(),
            target: SemanticType::Integer,
        };
        assert_eq!(
            err.to_string(),
            "cannot cast value 'many' in column 'Number of Requests' row 4 to integer"
        );
    }
}
