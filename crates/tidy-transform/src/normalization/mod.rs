//! Cell-level normalization helpers.
//!
//! These are pure functions over single values; the table-level operations
//! in [`crate::ops`] map them over columns.

pub mod artifacts;
pub mod datetime;
pub mod numeric;

pub use artifacts::{ENCODING_ARTIFACTS, has_artifacts, strip_artifacts};
pub use datetime::{from_unix_seconds, parse_date, parse_datetime};
pub use numeric::{parse_float, parse_integer};
