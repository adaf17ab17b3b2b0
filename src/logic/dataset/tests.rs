use std::fs;
use std::io::Write;

use flate2::write::GzEncoder;
use tempfile::tempdir;

use super::loader::{load_kdd, read_kdd, Compression};
use super::table::{Column, ColumnData, DataType, Table, Value};
use super::export::write_csv;
use crate::error::KddError;
use crate::logic::schema::{COLUMN_COUNT, KDD_COLUMNS};

/// Build a valid 42-field line with the given label
pub(crate) fn kdd_line(label: &str) -> String {
    format!(
        "0,tcp,http,SF,181,5450,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,8,8,0.00,0.00,0.00,0.00,1.00,0.00,0.00,9,9,1.00,0.00,0.11,0.00,0.00,0.00,0.00,0.00,{}",
        label
    )
}

fn sample_text() -> String {
    [
        kdd_line("normal."),
        kdd_line("neptune."),
        "0,icmp,ecr_i,SF,1032,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,511,511,0.00,0.00,0.00,0.00,1.00,0.00,0.00,255,255,1.00,0.00,1.00,0.00,0.00,0.00,0.00,0.00,smurf.".to_string(),
    ]
    .join("\n")
        + "\n"
}

#[test]
fn test_read_fixed_schema() {
    let table = read_kdd(sample_text().as_bytes()).unwrap();

    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_cols(), COLUMN_COUNT);
    assert_eq!(table.column_names(), KDD_COLUMNS.to_vec());
}

#[test]
fn test_column_types_inferred() {
    let table = read_kdd(sample_text().as_bytes()).unwrap();

    assert_eq!(table.column("duration").unwrap().data.dtype(), DataType::Int);
    assert_eq!(table.column("src_bytes").unwrap().data.dtype(), DataType::Int);
    assert_eq!(table.column("serror_rate").unwrap().data.dtype(), DataType::Float);
    assert_eq!(table.column("service").unwrap().data.dtype(), DataType::Text);
    assert_eq!(table.column("label").unwrap().data.dtype(), DataType::Text);

    let service = table.column("service").unwrap().data.as_text().unwrap();
    assert_eq!(service[2].as_deref(), Some("ecr_i"));
}

#[test]
fn test_int_column_widens_to_float() {
    let mut second = kdd_line("normal.");
    // duration gets a fractional value on the second row
    second.replace_range(0..1, "2.5");
    let text = format!("{}\n{}\n", kdd_line("normal."), second);

    let table = read_kdd(text.as_bytes()).unwrap();
    let duration = &table.column("duration").unwrap().data;
    assert_eq!(duration, &ColumnData::Float(vec![0.0, 2.5]));
}

#[test]
fn test_row_count_matches_non_empty_lines() {
    let text = format!("{}\n\n{}\n\n{}", kdd_line("normal."), kdd_line("smurf."), kdd_line("back."));
    let table = read_kdd(text.as_bytes()).unwrap();
    assert_eq!(table.n_rows(), 3);
}

#[test]
fn test_short_line_is_parse_error() {
    let line = kdd_line("normal.");
    let short = line.rsplit_once(',').unwrap().0.to_string();
    assert_eq!(short.split(',').count(), 41);

    let text = format!("{}\n{}\n", line, short);
    match read_kdd(text.as_bytes()) {
        Err(KddError::Parse { line, message }) => {
            assert_eq!(line, 2);
            assert!(message.contains("found 41"));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_long_line_is_parse_error() {
    let long = format!("{},extra", kdd_line("normal."));
    assert_eq!(long.split(',').count(), 43);

    let result = read_kdd(long.as_bytes());
    assert!(matches!(result, Err(KddError::Parse { line: 1, .. })));
}

#[test]
fn test_bad_number_is_parse_error() {
    let bad = kdd_line("normal.").replacen("181", "lots", 1);
    match read_kdd(bad.as_bytes()) {
        Err(KddError::Parse { message, .. }) => assert!(message.contains("src_bytes")),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_load_plain_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kdd.csv");
    fs::write(&path, sample_text()).unwrap();

    let table = load_kdd(&path, Compression::None).unwrap();
    assert_eq!(table.n_rows(), 3);
}

#[test]
fn test_load_gzip_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kdd.gz");

    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(sample_text().as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    assert_eq!(Compression::from_path(&path), Compression::Gzip);
    let table = load_kdd(&path, Compression::Gzip).unwrap();
    assert_eq!(table.n_rows(), 3);
    let labels = table.column("label").unwrap().data.as_text().unwrap();
    assert_eq!(labels[2].as_deref(), Some("smurf."));
}

#[test]
fn test_load_concatenated_gzip_members() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kdd.gz");

    let mut bytes = Vec::new();
    for part in [sample_text(), kdd_line("satan.") + "\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(part.as_bytes()).unwrap();
        bytes.extend(encoder.finish().unwrap());
    }
    fs::write(&path, bytes).unwrap();

    let table = load_kdd(&path, Compression::Gzip).unwrap();
    assert_eq!(table.n_rows(), 4);
    let labels = table.column("label").unwrap().data.as_text().unwrap();
    assert_eq!(labels[0].as_deref(), Some("normal."));
    assert_eq!(labels[3].as_deref(), Some("satan."));
}

#[test]
fn test_quotes_are_plain_characters() {
    // 43 raw fields, two of them wrapped in one pair of quotes
    let line = kdd_line("normal.").replacen("tcp,http", "\"tcp,http\"", 1);
    assert_eq!(line.split(',').count(), COLUMN_COUNT + 1);

    match read_kdd(line.as_bytes()) {
        Err(KddError::Parse { line, message }) => {
            assert_eq!(line, 1);
            assert!(message.contains("found 43"), "{}", message);
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.gz");

    match load_kdd(&path, Compression::Gzip) {
        Err(KddError::FileNotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_table_rejects_ragged_columns() {
    let result = Table::new(vec![
        Column::new("a", ColumnData::Int(vec![1, 2])),
        Column::new("b", ColumnData::Int(vec![1])),
    ]);
    assert!(matches!(result, Err(KddError::ShapeMismatch { .. })));
}

#[test]
fn test_drop_columns_ignores_absent() {
    let table = read_kdd(sample_text().as_bytes()).unwrap();
    let dropped = table.drop_columns(&["label", "not_a_column"]);

    assert_eq!(dropped.n_cols(), COLUMN_COUNT - 1);
    assert_eq!(dropped.n_rows(), 3);
    assert!(!dropped.has_column("label"));
    // Source table untouched
    assert!(table.has_column("label"));
}

#[test]
fn test_with_column_replaces_in_place() {
    let table = Table::new(vec![
        Column::new("a", ColumnData::Int(vec![1, 2])),
        Column::new("b", ColumnData::Int(vec![3, 4])),
    ])
    .unwrap();

    let replaced = table
        .with_column(Column::new("a", ColumnData::Int(vec![9, 9])))
        .unwrap();
    assert_eq!(replaced.column_names(), vec!["a", "b"]);
    assert_eq!(replaced.column("a").unwrap().data, ColumnData::Int(vec![9, 9]));

    match table.with_column(Column::new("c", ColumnData::Int(vec![1]))) {
        Err(KddError::ShapeMismatch {
            column,
            expected,
            actual,
        }) => {
            assert_eq!(column, "c");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_zero_column_table_keeps_row_count() {
    let table = read_kdd(sample_text().as_bytes()).unwrap();

    let none_left = table.drop_columns(KDD_COLUMNS);
    assert_eq!(none_left.n_cols(), 0);
    assert_eq!(none_left.n_rows(), 3);

    let none_selected = table.select(&[] as &[&str]).unwrap();
    assert_eq!(none_selected.n_rows(), 3);
    assert_eq!(none_selected, Table::empty(3));

    // Columns added back must still match the row count
    assert!(none_left
        .with_column(Column::new("x", ColumnData::Int(vec![1])))
        .is_err());
    let refilled = none_left
        .with_column(Column::new("x", ColumnData::Int(vec![1, 2, 3])))
        .unwrap();
    assert_eq!(refilled.n_rows(), 3);

    // A truly empty table accepts any column
    let fresh = Table::default()
        .with_column(Column::new("x", ColumnData::Int(vec![1, 2])))
        .unwrap();
    assert_eq!(fresh.n_rows(), 2);
}

#[test]
fn test_filter_and_value_counts() {
    let table = read_kdd(sample_text().as_bytes()).unwrap();

    let counts = table.value_counts("protocol_type").unwrap();
    assert_eq!(counts, vec![("tcp".to_string(), 2), ("icmp".to_string(), 1)]);

    let filtered = table.filter_rows(&[true, false, true]).unwrap();
    assert_eq!(filtered.n_rows(), 2);
    assert!(table.filter_rows(&[true]).is_err());
    assert!(table.take_rows(&[5]).is_err());
}

#[test]
fn test_n_unique_skips_nulls() {
    let text = ColumnData::Text(vec![Some("a".into()), None, Some("a".into()), None]);
    assert_eq!(text.n_unique(), 1);
    assert_eq!(text.null_count(), 2);
    assert_eq!(text.get(1), Some(Value::Null));

    let floats = ColumnData::Float(vec![0.0, -0.0, f64::NAN, 1.5]);
    assert_eq!(floats.n_unique(), 2);
}

#[test]
fn test_write_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("derived.csv");

    let table = Table::new(vec![
        Column::new("n", ColumnData::Int(vec![1, 0])),
        Column::new("family", ColumnData::Text(vec![Some("dos".into()), None])),
    ])
    .unwrap();

    let rows = write_csv(&table, &path).unwrap();
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "n,family\n1,dos\n0,\n");
}
