use std::fs;

use chrono::NaiveDate;
use tidy_model::{Column, SemanticType, Table, Value};
use tidy_output::{WriteOptions, output_path_for, write_csv};

#[test]
fn writes_cleaned_table_into_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let created = NaiveDate::from_ymd_opt(2013, 10, 31)
        .and_then(|d| d.and_hms_opt(2, 8, 41))
        .unwrap();
    let table = Table::new(vec![
        Column::from_strings("Incident Zip", [Some("11432"), None]),
        Column::new(
            "Created Date",
            SemanticType::DateTime,
            vec![Value::DateTime(created), Value::Null],
        )
        .unwrap(),
        Column::from_integers("requests", [Some(3), Some(4)]),
    ])
    .unwrap();

    let path = output_path_for(
        std::path::Path::new("311-service-requests.csv"),
        &dir.path().join("cleaned"),
        "_clean",
    );
    write_csv(&table, &path, &WriteOptions::default().with_null_value("NaN")).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Incident Zip,Created Date,requests\n11432,2013-10-31 02:08:41,3\nNaN,NaN,4\n"
    );
}

#[test]
fn options_deserialize_with_defaults() {
    let options: WriteOptions = serde_json::from_str(r#"{"null_value": "NA"}"#).unwrap();
    assert_eq!(options, WriteOptions::default().with_null_value("NA"));
}
