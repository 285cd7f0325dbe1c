//! Rule-driven table cleaning for Tidy Table Studio.
//!
//! A [`TableCleaner`] holds an ordered list of [`CleaningRule`]s and turns a
//! loaded [`Table`](tidy_model::Table) into a canonical one: encoding
//! artifacts stripped, sentinel strings mapped to null, long codes cut down
//! and text columns cast to their real types. The crate also provides row
//! partitioning by [`Predicate`] and the grouping helpers in [`aggregate`].
//!
//! # Example
//!
//! ```
//! use tidy_model::{Column, Table};
//! use tidy_transform::{CleaningRule, TableCleaner};
//!
//! let table = Table::new(vec![Column::from_strings(
//!     "Incident Zip",
//!     [Some("10001"), Some("29616-0759"), Some("NO CLUE")],
//! )])
//! .unwrap();
//!
//! let cleaner = TableCleaner::new(vec![
//!     CleaningRule::map_null_sentinel("Incident Zip", ["NO CLUE", "0"]),
//!     CleaningRule::truncate("Incident Zip", 5),
//! ]);
//! let cleaned = cleaner.apply(&table).unwrap();
//!
//! let zips = cleaned.column("Incident Zip").unwrap();
//! assert_eq!(zips.get(1).and_then(|v| v.as_str()), Some("29616"));
//! assert!(zips.get(2).is_some_and(|v| v.is_null()));
//! ```

pub mod aggregate;
mod cleaner;
mod error;
pub mod normalization;
pub mod ops;
mod predicate;
mod rules;

pub use aggregate::{Aggregation, GroupKey, group_by, value_counts};
pub use cleaner::{TableCleaner, apply, apply_rule};
pub use error::{CleanError, Result};
pub use ops::{
    cast_column, classify_and_filter, drop_column, filter_rows, normalize_nulls, rename_column,
    strip_encoding_artifacts, truncate_strings,
};
pub use predicate::{BoundPredicate, Predicate};
pub use rules::CleaningRule;
