//! CSV serialization of tables.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tidy_model::Table;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// How tables are written as CSV.
///
/// Dates are written as `%Y-%m-%d` and datetimes as `%Y-%m-%d %H:%M:%S`;
/// floats use the shortest representation that round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Field separator.
    pub delimiter: char,
    /// Text written for null cells.
    pub null_value: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            null_value: String::new(),
        }
    }
}

impl WriteOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_null_value(mut self, null_value: impl Into<String>) -> Self {
        self.null_value = null_value.into();
        self
    }

    fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(OutputError::InvalidDelimiter {
                delimiter: self.delimiter,
            })
    }
}

/// Write `table` to `path`, creating parent directories as needed.
pub fn write_csv(table: &Table, path: &Path, options: &WriteOptions) -> Result<()> {
    ensure_parent_dir(path)?;
    let writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .from_path(path)
        .map_err(|source| OutputError::CsvWrite {
            path: path.to_path_buf(),
            source,
        })?;
    write_records(table, writer, options).map_err(|source| OutputError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote CSV"
    );
    Ok(())
}

/// Write `table` as CSV into any writer.
pub fn write_csv_to<W: Write>(table: &Table, writer: W, options: &WriteOptions) -> Result<()> {
    let writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .from_writer(writer);
    write_records(table, writer, options).map_err(|source| OutputError::CsvWrite {
        path: "<writer>".into(),
        source,
    })
}

/// Render `table` as a CSV string.
pub fn to_csv_string(table: &Table, options: &WriteOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(table, &mut buf, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_records<W: Write>(
    table: &Table,
    mut writer: csv::Writer<W>,
    options: &WriteOptions,
) -> csv::Result<()> {
    writer.write_record(table.column_names())?;
    let mut record = Vec::with_capacity(table.column_count());
    for row in 0..table.row_count() {
        record.clear();
        for column in table.columns() {
            let text = match column.get(row) {
                Some(value) if !value.is_null() => value.to_string(),
                _ => options.null_value.clone(),
            };
            record.push(text);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
