//! Input discovery for batch runs.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Resolve an input argument into the CSV files it names.
///
/// A file is returned as-is; a directory is expanded with [`list_csv_files`].
pub fn resolve_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        list_csv_files(input)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(IngestError::FileNotFound {
            path: input.to_path_buf(),
        })
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["weather_2012_03.csv", "weather_2012_01.CSV", "notes.txt"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        dir
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["weather_2012_01.CSV", "weather_2012_03.csv"]);
    }

    #[test]
    fn test_list_csv_files_missing_dir() {
        let result = list_csv_files(Path::new("/nonexistent/dir"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_resolve_inputs() {
        let dir = create_test_dir();
        assert_eq!(resolve_inputs(dir.path()).unwrap().len(), 2);

        let single = dir.path().join("weather_2012_03.csv");
        assert_eq!(resolve_inputs(&single).unwrap(), vec![single.clone()]);

        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            resolve_inputs(&missing),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
