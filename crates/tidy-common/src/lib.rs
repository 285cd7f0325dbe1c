//! Shared utilities for Tidy Table Studio crates.
//!
//! Polars is only used at the loading edge; this crate converts its
//! `DataFrame`s and `AnyValue`s into [`tidy_model`] tables and cells.

mod polars;

pub use crate::polars::{
    ConversionError, any_to_value, column_from_polars, semantic_type_of, table_from_dataframe,
};
