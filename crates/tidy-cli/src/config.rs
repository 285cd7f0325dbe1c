//! Pipeline configuration files.
//!
//! A pipeline is a JSON document:
//!
//! ```json
//! {
//!   "load": { "encoding": "latin1", "null_values": ["NO CLUE", "N/A", "0"] },
//!   "rules": [
//!     { "rule": "truncate", "column": "Incident Zip", "max_len": 5 },
//!     { "rule": "map_null_sentinel", "column": "Incident Zip", "sentinels": ["00000"] }
//!   ],
//!   "schema": [{ "name": "Incident Zip", "type": "string" }],
//!   "partition": { "op": "starts_with", "column": "Incident Zip", "prefixes": ["0", "1"] },
//!   "output": { "null_value": "" }
//! }
//! ```
//!
//! Every section is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tidy_ingest::{CsvLoader, LoadOptions};
use tidy_model::ColumnSpec;
use tidy_output::WriteOptions;
use tidy_transform::{CleaningRule, Predicate, TableCleaner};

/// Environment variable naming the default pipeline file.
pub const PIPELINE_ENV: &str = "TIDY_PIPELINE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// How input files are read.
    pub load: LoadOptions,
    /// Cleaning rules, applied in order.
    pub rules: Vec<CleaningRule>,
    /// Columns the cleaned table must conform to.
    pub schema: Option<Vec<ColumnSpec>>,
    /// Rows matching this predicate are kept; the rest are written aside.
    pub partition: Option<Predicate>,
    /// How cleaned tables are written.
    pub output: WriteOptions,
}

impl PipelineConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse pipeline JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pipeline {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load pipeline {}", path.display()))
    }

    pub fn cleaner(&self) -> TableCleaner {
        TableCleaner::new(self.rules.clone())
    }

    pub fn loader(&self) -> CsvLoader {
        CsvLoader::new(self.load.clone())
    }
}

/// The pipeline file to use: the explicit path, else `$TIDY_PIPELINE`.
pub fn resolve_pipeline_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(PIPELINE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the resolved pipeline, or the empty default when none is configured.
pub fn load_pipeline(explicit: Option<&Path>) -> Result<PipelineConfig> {
    match resolve_pipeline_path(explicit) {
        Some(path) => {
            tracing::info!(path = %path.display(), "using pipeline");
            PipelineConfig::from_path(&path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use tidy_ingest::TextEncoding;
    use tidy_model::SemanticType;

    use super::*;

    #[test]
    fn test_full_document() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "load": {"encoding": "latin1", "null_values": ["NO CLUE", "N/A", "0"]},
                "rules": [
                    {"rule": "truncate", "column": "Incident Zip", "max_len": 5},
                    {"rule": "map_null_sentinel", "column": "Incident Zip", "sentinels": ["00000"]}
                ],
                "schema": [{"name": "Incident Zip", "type": "string"}],
                "partition": {"op": "starts_with", "column": "Incident Zip", "prefixes": ["0", "1"]},
                "output": {"null_value": "NaN"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.load.encoding, TextEncoding::Latin1);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(
            config.schema,
            Some(vec![ColumnSpec::new("Incident Zip", SemanticType::String)])
        );
        assert_eq!(
            config.partition,
            Some(Predicate::starts_with("Incident Zip", ["0", "1"]))
        );
        assert_eq!(config.output.null_value, "NaN");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            PipelineConfig::from_json_str("{}").unwrap(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(PipelineConfig::from_json_str(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = PipelineConfig::from_json_str(r#"{"rules": [{"rule": "explode"}]}"#).unwrap_err();
        assert!(format!("{err:#}").contains("explode"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_pipeline_path(Some(Path::new("weather.json")));
        assert_eq!(path, Some(PathBuf::from("weather.json")));
    }
}
