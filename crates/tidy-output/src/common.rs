//! Path helpers shared by output writers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Path for the cleaned copy of `input` inside `output_dir`.
///
/// Keeps the input's file stem and appends `suffix`, e.g.
/// `311-service-requests.csv` becomes `311-service-requests_clean.csv`.
pub fn output_path_for(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{stem}{suffix}.csv"))
}
