//! Semantic column types and column specifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The semantic type shared by every non-null cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Integer,
    Float,
    Date,
    #[serde(alias = "timestamp")]
    DateTime,
}

impl SemanticType {
    /// Lowercase name used in config files and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// Returns true for integer and float columns.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Returns true for date and datetime columns.
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "utf8" | "text" => Ok(Self::String),
            "integer" | "int" | "int64" | "int32" => Ok(Self::Integer),
            "float" | "float64" | "double" | "number" => Ok(Self::Float),
            "date" => Ok(Self::Date),
            "datetime" | "timestamp" => Ok(Self::DateTime),
            other => Err(format!("unknown semantic type '{other}'")),
        }
    }
}

fn default_nullable() -> bool {
    true
}

/// Declared shape of one column: name, type, and whether nulls are allowed.
///
/// A list of specs is known when a pipeline is built and can be checked
/// against a cleaned table with [`crate::Table::conform_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub dtype: SemanticType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ColumnSpec {
    /// Create a nullable column spec.
    pub fn new(name: impl Into<String>, dtype: SemanticType) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable: true,
        }
    }

    /// Mark the column as required (no nulls).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }
}
