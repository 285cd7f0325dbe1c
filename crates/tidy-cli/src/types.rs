use std::path::PathBuf;

/// Outcome of cleaning one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub input: PathBuf,
    pub rows_in: usize,
    pub columns_in: usize,
    pub rows_out: usize,
    pub columns_out: usize,
    /// Null cells in the cleaned table.
    pub nulls_out: usize,
    /// Rows set aside by the partition predicate.
    pub rows_rejected: usize,
    /// Where the cleaned table was written (`None` on a dry run).
    pub output: Option<PathBuf>,
    pub rejected_output: Option<PathBuf>,
}

/// Outcome of a `clean` run over one or more files.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub files: Vec<FileSummary>,
    /// One message per file that failed.
    pub errors: Vec<String>,
    pub dry_run: bool,
}

impl CleanReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
