//! Data ingestion for Tidy Table Studio.
//!
//! This crate is the loader: it turns local CSV files into
//! [`tidy_model::Table`]s. Parsing is delegated to Polars; this crate adds
//! byte decoding, header checks and input discovery around it.
//!
//! # Features
//!
//! - **CSV Loading**: Polars reader with null markers, text-only columns and optional type inference
//! - **Decoding**: UTF-8 (BOM removed) or windows-1252 via `encoding_rs`
//! - **Discovery**: Expand a directory into its CSV files for batch runs
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tidy_ingest::{CsvLoader, LoadOptions, Loader, TextEncoding};
//!
//! let loader = CsvLoader::new(
//!     LoadOptions::default()
//!         .with_encoding(TextEncoding::Latin1)
//!         .with_null_values(["NO CLUE", "N/A", "0"])
//!         .with_text_columns(["Incident Zip"]),
//! );
//! let table = loader.load(Path::new("data/311-service-requests.csv"))?;
//! ```

mod csv;
mod discovery;
mod error;
mod loader;
mod options;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    CsvHeaders, check_file_size, check_file_size_with_limit, decode_bytes,
    detect_unsupported_bom, parse_csv_line, read_csv_bytes, read_csv_headers, read_csv_table,
};

// === Loader ===
pub use loader::{CsvLoader, Loader};
pub use options::{
    DEFAULT_INFER_SCHEMA_LENGTH, LoadOptions, MAX_CSV_FILE_SIZE, TextEncoding, WIDE_TABLE_COLUMNS,
};

// === File Discovery ===
pub use discovery::{list_csv_files, resolve_inputs};
