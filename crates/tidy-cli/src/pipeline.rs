//! Per-file clean pipeline: load, clean, check, partition, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tidy_ingest::Loader;
use tidy_model::Table;
use tidy_output::{output_path_for, write_csv};
use tidy_transform::classify_and_filter;

use crate::config::PipelineConfig;
use crate::logging::redact_value;
use crate::types::FileSummary;

/// Suffix appended to the stem of cleaned files.
pub const CLEAN_SUFFIX: &str = "_clean";

/// Suffix appended to the stem of rows set aside by the partition.
pub const REJECTED_SUFFIX: &str = "_rejected";

/// Directory created next to the input when no output is given.
pub const DEFAULT_OUTPUT_DIR: &str = "cleaned";

/// Where the cleaned copy of `input` goes.
///
/// A single input with an explicit `.csv` output is written there verbatim.
/// Otherwise `output` (or `<input dir>/cleaned`) is a directory and the file
/// is named `<stem>_clean.csv`.
pub fn output_path(input: &Path, output: Option<&Path>, batch: bool) -> PathBuf {
    match output {
        Some(path) if !batch && has_csv_extension(path) => path.to_path_buf(),
        Some(dir) => output_path_for(input, dir, CLEAN_SUFFIX),
        None => {
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            output_path_for(input, &parent.join(DEFAULT_OUTPUT_DIR), CLEAN_SUFFIX)
        }
    }
}

/// Sibling of `output` holding the rejected rows.
pub fn rejected_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix(CLEAN_SUFFIX).unwrap_or(&stem);
    output.with_file_name(format!("{stem}{REJECTED_SUFFIX}.csv"))
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Clean one table in memory: rules, schema check, partition.
///
/// Returns the kept rows and, when a partition is configured, the rows it
/// set aside.
pub fn clean_table(table: &Table, config: &PipelineConfig) -> Result<(Table, Option<Table>)> {
    let cleaned = config.cleaner().apply(table).context("apply cleaning rules")?;

    if let Some(schema) = &config.schema {
        cleaned.conform_to(schema).context("check schema")?;
    }

    match &config.partition {
        Some(predicate) => {
            let (kept, rejected) =
                classify_and_filter(&cleaned, predicate).context("partition rows")?;
            Ok((kept, Some(rejected)))
        }
        None => Ok((cleaned, None)),
    }
}

/// Run the full pipeline for one input file.
///
/// With `dry_run`, nothing is written and the summary carries no paths.
pub fn clean_file(
    input: &Path,
    config: &PipelineConfig,
    output: &Path,
    dry_run: bool,
) -> Result<FileSummary> {
    let _span = tracing::info_span!("file", path = %input.display()).entered();

    let table = config
        .loader()
        .load(input)
        .with_context(|| format!("load {}", input.display()))?;
    let (kept, rejected) =
        clean_table(&table, config).with_context(|| format!("clean {}", input.display()))?;

    if let Some(row) = kept.row(0) {
        let text: Vec<String> = row.iter().map(ToString::to_string).collect();
        let text = text.join(",");
        tracing::trace!(first_row = redact_value(&text), "first cleaned row");
    }

    let rows_rejected = rejected.as_ref().map_or(0, Table::row_count);
    let mut summary = FileSummary {
        input: input.to_path_buf(),
        rows_in: table.row_count(),
        columns_in: table.column_count(),
        rows_out: kept.row_count(),
        columns_out: kept.column_count(),
        nulls_out: kept.columns().iter().map(tidy_model::Column::null_count).sum(),
        rows_rejected,
        output: None,
        rejected_output: None,
    };

    if dry_run {
        tracing::info!(rows = summary.rows_out, "dry run, nothing written");
        return Ok(summary);
    }

    write_csv(&kept, output, &config.output)
        .with_context(|| format!("write {}", output.display()))?;
    summary.output = Some(output.to_path_buf());

    if let Some(rejected) = rejected.filter(|t| t.row_count() > 0) {
        let path = rejected_path(output);
        write_csv(&rejected, &path, &config.output)
            .with_context(|| format!("write {}", path.display()))?;
        summary.rejected_output = Some(path);
    }

    tracing::info!(
        rows_in = summary.rows_in,
        rows_out = summary.rows_out,
        rows_rejected,
        "cleaned file"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_explicit_file() {
        let path = output_path(Path::new("in/311.csv"), Some(Path::new("out/zips.csv")), false);
        assert_eq!(path, Path::new("out/zips.csv"));
    }

    #[test]
    fn test_output_path_directory() {
        let path = output_path(Path::new("in/311.csv"), Some(Path::new("out")), false);
        assert_eq!(path, Path::new("out/311_clean.csv"));
        let path = output_path(Path::new("in/311.csv"), Some(Path::new("out/x.csv")), true);
        assert_eq!(path, Path::new("out/x.csv/311_clean.csv"));
    }

    #[test]
    fn test_output_path_default() {
        let path = output_path(Path::new("in/311.csv"), None, false);
        assert_eq!(path, Path::new("in/cleaned/311_clean.csv"));
    }

    #[test]
    fn test_rejected_path() {
        assert_eq!(
            rejected_path(Path::new("out/311_clean.csv")),
            Path::new("out/311_rejected.csv")
        );
        assert_eq!(
            rejected_path(Path::new("out/zips.csv")),
            Path::new("out/zips_rejected.csv")
        );
    }
}
