//! Writers for cleaned tables.
//!
//! Only CSV is supported; tables are written with a header row and one
//! record per row.

pub mod common;
mod csv;
mod error;

pub use crate::csv::{WriteOptions, to_csv_string, write_csv, write_csv_to};
pub use common::{ensure_parent_dir, output_path_for};
pub use error::{OutputError, Result};
