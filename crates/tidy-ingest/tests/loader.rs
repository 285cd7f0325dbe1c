//! Integration tests for the CSV loader.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tidy_ingest::{CsvLoader, LoadOptions, Loader, TextEncoding};
use tidy_model::{SemanticType, Value};

fn write(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn latin1_decoding_keeps_bom_artifacts_in_header() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "weather_2012_03.csv",
        b"\xEF\xBB\xBF\"Longitude (x)\",Temp (\xC2\xB0C),Weather\n-73.75,-3.0,Snow\n-73.75,-2.5,\n",
    );

    let loader = CsvLoader::new(LoadOptions::default().with_encoding(TextEncoding::Latin1));
    let table = loader.load(&path).unwrap();

    assert_eq!(table.row_count(), 2);
    let names = table.column_names();
    assert!(names[0].starts_with("ï»¿"), "got {names:?}");
    assert_eq!(names[1], "Temp (Â°C)");
    assert_eq!(table.column("Weather").unwrap().get(1), Some(&Value::Null));
}

#[test]
fn utf8_decoding_removes_bom() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "weather.csv",
        b"\xEF\xBB\xBFLongitude (x),Temp (\xC2\xB0C)\n-73.75,-3.0\n",
    );

    let table = CsvLoader::default().load(&path).unwrap();

    assert_eq!(table.column_names(), vec!["Longitude (x)", "Temp (°C)"]);
    assert_eq!(
        table.column("Temp (°C)").unwrap().dtype(),
        SemanticType::Float
    );
}

#[test]
fn text_only_load_keeps_every_column_as_string() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "requests.csv",
        b"Incident Zip,Number of Requests\n00083,3\n29616-0759,1\n",
    );

    let loader = CsvLoader::new(LoadOptions::default().with_infer_types(false));
    let table = loader.load(&path).unwrap();

    for column in table.columns() {
        assert_eq!(column.dtype(), SemanticType::String);
    }
    assert_eq!(
        table.column("Incident Zip").unwrap().values(),
        &[Value::str("00083"), Value::str("29616-0759")]
    );
}

#[test]
fn semicolon_separated_bike_counts() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "bikes.csv",
        b"Date;Berri 1;Rachel1\n01/01/2012;35;16\n02/01/2012;83;43\n",
    );

    let loader = CsvLoader::new(LoadOptions::default().with_delimiter(';'));
    let table = loader.load(&path).unwrap();

    assert_eq!(table.column_names(), vec!["Date", "Berri 1", "Rachel1"]);
    assert_eq!(
        table.column("Berri 1").unwrap().values(),
        &[Value::Int(35), Value::Int(83)]
    );
}

#[test]
fn non_ascii_delimiter_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "x.csv", b"a,b\n1,2\n");

    let loader = CsvLoader::new(LoadOptions::default().with_delimiter('¦'));
    assert!(matches!(
        loader.load(&path),
        Err(tidy_ingest::IngestError::InvalidDelimiter { delimiter: '¦' })
    ));
}
