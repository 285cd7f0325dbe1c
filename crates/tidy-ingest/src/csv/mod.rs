//! CSV reading utilities.

mod decode;
mod header;
mod reader;

pub use decode::{decode_bytes, detect_unsupported_bom};
pub use header::{CsvHeaders, parse_csv_line};
pub use reader::{
    check_file_size, check_file_size_with_limit, read_csv_bytes, read_csv_headers, read_csv_table,
};
