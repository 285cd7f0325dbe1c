//! The loading seam between sources and the cleaner.

use std::path::Path;

use tidy_model::Table;

use crate::csv::read_csv_table;
use crate::error::Result;
use crate::options::LoadOptions;

/// Produces a [`Table`] from a source.
///
/// The loader owns byte decoding, delimiter handling and initial typing;
/// the cleaner only ever sees the resulting table.
pub trait Loader {
    fn load(&self, source: &Path) -> Result<Table>;
}

/// Loads local CSV files through Polars.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    options: LoadOptions,
}

impl CsvLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }
}

impl Loader for CsvLoader {
    fn load(&self, source: &Path) -> Result<Table> {
        let _span = tracing::debug_span!("load", path = %source.display()).entered();
        read_csv_table(source, &self.options)
    }
}
