//! CSV file reading into [`Table`]s.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use tidy_model::Table;

use crate::error::{IngestError, Result};
use crate::options::{LoadOptions, WIDE_TABLE_COLUMNS};

use super::decode::{decode_bytes, detect_unsupported_bom};
use super::header::{CsvHeaders, parse_csv_line};

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, crate::options::MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads the header line of decoded CSV text.
///
/// With `has_header = false` the names are generated from the field count
/// of the first line.
pub fn read_csv_headers(
    text: &str,
    delimiter: char,
    has_header: bool,
    origin: &Path,
) -> Result<CsvHeaders> {
    let first = text
        .lines()
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| IngestError::EmptyCsv {
            path: origin.to_path_buf(),
        })?;

    let fields = parse_csv_line(first, delimiter);
    if !has_header {
        return Ok(CsvHeaders::generated(fields.len()));
    }

    let headers = CsvHeaders::named(fields);
    if let Some(position) = headers.first_blank() {
        return Err(IngestError::EmptyColumnName {
            path: origin.to_path_buf(),
            position,
        });
    }
    Ok(headers)
}

/// Reads a CSV file into a [`Table`].
pub fn read_csv_table(path: &Path, options: &LoadOptions) -> Result<Table> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    read_csv_bytes(&bytes, options, path)
}

/// Parses in-memory CSV bytes into a [`Table`].
///
/// `origin` is only used in error messages and logs.
pub fn read_csv_bytes(bytes: &[u8], options: &LoadOptions, origin: &Path) -> Result<Table> {
    if let Some(encoding) = detect_unsupported_bom(bytes) {
        return Err(IngestError::UnsupportedEncoding {
            path: origin.to_path_buf(),
            encoding,
        });
    }

    let separator = u8::try_from(options.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidDelimiter {
            delimiter: options.delimiter,
        })?;

    let text = decode_bytes(bytes, options.encoding);
    let headers = read_csv_headers(&text, options.delimiter, options.has_header, origin)?;

    let df = build_read_options(options, separator)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %origin.display(),
            columns = df.width(),
            limit = WIDE_TABLE_COLUMNS,
            "wide table; column-wide cleaning rules will be slow"
        );
    }

    let table =
        tidy_common::table_from_dataframe(&df).map_err(|source| IngestError::Conversion {
            path: origin.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %origin.display(),
        encoding = options.encoding.as_str(),
        rows = table.row_count(),
        columns = headers.len(),
        "loaded CSV"
    );

    Ok(table)
}

fn build_read_options(options: &LoadOptions, separator: u8) -> CsvReadOptions {
    let mut parse_options = CsvParseOptions::default()
        .with_separator(separator)
        .with_missing_is_null(options.missing_is_null);
    if !options.null_values.is_empty() {
        let values = options
            .null_values
            .iter()
            .map(|v| PlSmallStr::from(v.as_str()))
            .collect();
        parse_options = parse_options.with_null_values(Some(NullValues::AllColumns(values)));
    }

    let infer_length = if options.infer_types {
        options.infer_schema_length
    } else {
        0
    };

    let mut read_options = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_infer_schema_length(Some(infer_length))
        .with_parse_options(parse_options);

    if !options.text_columns.is_empty() {
        let mut schema = Schema::with_capacity(options.text_columns.len());
        for name in &options.text_columns {
            schema.with_column(PlSmallStr::from(name.as_str()), DataType::String);
        }
        read_options = read_options.with_schema_overwrite(Some(Arc::new(schema)));
    }

    read_options
}
