//! Integration tests for the per-file clean pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tidy_cli::config::PipelineConfig;
use tidy_cli::pipeline::{clean_file, output_path};

const REQUESTS: &str = "\
Unique Key,Created Date,Borough,Incident Zip,City
1,10/31/2013 02:08:41 AM,QUEENS,11432,JAMAICA
2,10/31/2013 02:12:05 AM,MANHATTAN,10001-4567,NEW YORK
3,10/31/2013 02:15:00 AM,BROOKLYN,NO CLUE,BROOKLYN
4,10/31/2013 03:01:33 AM,Unspecified,29616,
5,10/31/2013 03:20:10 AM,BRONX,00000,BRONX
";

const PIPELINE: &str = r#"{
    "load": {"text_columns": ["Incident Zip"]},
    "rules": [
        {"rule": "truncate", "column": "Incident Zip", "max_len": 5},
        {"rule": "map_null_sentinel", "column": "Incident Zip", "sentinels": ["NO CLUE", "00000"]},
        {"rule": "map_null_sentinel", "column": "Borough", "sentinels": ["Unspecified"]},
        {"rule": "cast", "column": "Created Date", "to": "datetime"}
    ],
    "partition": {"op": "starts_with", "column": "Incident Zip", "prefixes": ["0", "1"]}
}"#;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("311-service-requests.csv");
    fs::write(&input, REQUESTS).unwrap();
    (dir, input)
}

#[test]
fn cleans_partitions_and_writes_both_halves() {
    let (dir, input) = setup();
    let config = PipelineConfig::from_json_str(PIPELINE).unwrap();
    let target = output_path(&input, Some(&dir.path().join("out")), false);

    let summary = clean_file(&input, &config, &target, false).unwrap();

    assert_eq!(summary.rows_in, 5);
    assert_eq!(summary.rows_out, 2);
    assert_eq!(summary.rows_rejected, 3);
    assert_eq!(summary.output.as_deref(), Some(target.as_path()));

    let kept = fs::read_to_string(&target).unwrap();
    assert_eq!(
        kept,
        "Unique Key,Created Date,Borough,Incident Zip,City\n\
         1,2013-10-31 02:08:41,QUEENS,11432,JAMAICA\n\
         2,2013-10-31 02:12:05,MANHATTAN,10001,NEW YORK\n"
    );

    let rejected = summary.rejected_output.unwrap();
    assert_eq!(
        rejected,
        dir.path().join("out").join("311-service-requests_rejected.csv")
    );
    let rejected = fs::read_to_string(rejected).unwrap();
    assert_eq!(rejected.lines().count(), 4);
    assert!(rejected.contains("4,2013-10-31 03:01:33,,29616,\n"));
}

#[test]
fn dry_run_writes_nothing() {
    let (dir, input) = setup();
    let config = PipelineConfig::from_json_str(PIPELINE).unwrap();
    let target = output_path(&input, None, false);

    let summary = clean_file(&input, &config, &target, true).unwrap();

    assert_eq!(summary.rows_out, 2);
    assert_eq!(summary.output, None);
    assert!(!dir.path().join("cleaned").exists());
}

#[test]
fn schema_violation_fails_the_file() {
    let (dir, input) = setup();
    let config = PipelineConfig::from_json_str(
        r#"{
            "rules": [{"rule": "map_null_sentinel", "column": "Incident Zip", "sentinels": ["NO CLUE"]}],
            "schema": [{"name": "Incident Zip", "type": "string", "nullable": false}]
        }"#,
    )
    .unwrap();
    let target = dir.path().join("out.csv");

    let err = clean_file(&input, &config, &target, false).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("check schema"), "{message}");
    assert!(message.contains("Incident Zip"), "{message}");
    assert!(!target.exists());
}

#[test]
fn unknown_column_names_the_file() {
    let (dir, input) = setup();
    let config = PipelineConfig::from_json_str(
        r#"{"rules": [{"rule": "rename", "from": "Borough ", "to": "borough"}]}"#,
    )
    .unwrap();

    let err = clean_file(&input, &config, &dir.path().join("out.csv"), false).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("311-service-requests.csv"), "{message}");
    assert!(message.contains("unknown column 'Borough '"), "{message}");
}

#[test]
fn pipeline_file_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.json");
    fs::write(&path, PIPELINE).unwrap();

    let config = PipelineConfig::from_path(&path).unwrap();
    assert_eq!(config.rules.len(), 4);
    assert!(PipelineConfig::from_path(Path::new("missing.json")).is_err());
}
