//! Table model for Tidy Table Studio.
//!
//! This crate holds the value types every other crate passes around:
//!
//! - [`Table`] / [`Column`]: columnar data with a uniform row count and unique names
//! - [`Value`]: a single cell, with one null marker
//! - [`SemanticType`] / [`ColumnSpec`]: declared column shapes
//! - [`ChartSpec`] / [`Renderer`]: the seam to whatever draws aggregated tables
//!
//! # Example
//!
//! ```
//! use tidy_model::{Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::from_strings("Incident Zip", [Some("10001"), Some("NO CLUE")]),
//!     Column::from_strings("City", [Some("NEW YORK"), None]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_names(), vec!["Incident Zip", "City"]);
//! ```

mod chart;
mod error;
mod schema;
mod table;
mod value;

pub use chart::{ChartKind, ChartSpec, Renderer};
pub use error::{ModelError, Result};
pub use schema::{ColumnSpec, SemanticType};
pub use table::{Column, Table};
pub use value::{DATE_FORMAT, DATETIME_FORMAT, Value, format_numeric};
