//! Loader configuration.

use serde::{Deserialize, Serialize};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Column count above which loading logs a wide-table warning. Every
/// cleaning rule that scans all columns gets slower past this point.
pub const WIDE_TABLE_COLUMNS: usize = 500;

/// Default number of rows Polars inspects when inferring column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Byte encoding used to decode the input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8; a leading byte-order mark is removed.
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// Single-byte Western European codepage (windows-1252).
    ///
    /// Decoding UTF-8 bytes this way reproduces the classic `ï»¿` and `Â`
    /// artifacts, which the cleaner can strip afterwards.
    #[serde(alias = "windows-1252", alias = "cp1252", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin1",
        }
    }
}

/// How a CSV source is read into a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Byte decoding applied before parsing.
    pub encoding: TextEncoding,
    /// Field separator.
    pub delimiter: char,
    /// Whether the first line holds column names.
    pub has_header: bool,
    /// Strings read as null in every column (exact match).
    pub null_values: Vec<String>,
    /// Read empty fields as null.
    pub missing_is_null: bool,
    /// Let Polars infer integer and float columns; otherwise everything is text.
    pub infer_types: bool,
    /// Rows inspected for type inference.
    pub infer_schema_length: usize,
    /// Columns always read as text (zip codes, identifiers with leading zeros).
    pub text_columns: Vec<String>,
    /// Files larger than this are rejected.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            delimiter: ',',
            has_header: true,
            null_values: Vec::new(),
            missing_is_null: true,
            infer_types: true,
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            text_columns: Vec::new(),
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_null_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_text_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.text_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_infer_types(mut self, enable: bool) -> Self {
        self.infer_types = enable;
        self
    }

    #[must_use]
    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}
