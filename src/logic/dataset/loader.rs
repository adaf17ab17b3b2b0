//! KDD file loader
//!
//! Reads headerless, comma-separated connection records (optionally gzip
//! compressed) into a [`Table`] with the fixed 42-column layout.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};

use super::table::{Column, ColumnData, Table};
use crate::error::{KddError, KddResult};
use crate::logic::schema::{column_kind, ColumnKind, COLUMN_COUNT, KDD_COLUMNS};

/// Compression of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Gzip,
    None,
}

impl Compression {
    /// Gzip when the file name ends in `.gz`
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::None,
        }
    }
}

/// Load a KDD file from disk
pub fn load_kdd(path: impl AsRef<Path>, compression: Compression) -> KddResult<Table> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => KddError::FileNotFound(path.to_path_buf()),
        _ => KddError::Io(e),
    })?;

    let table = match compression {
        Compression::Gzip => read_kdd(MultiGzDecoder::new(BufReader::new(file)))?,
        Compression::None => read_kdd(BufReader::new(file))?,
    };

    log::info!(
        "Loaded {} rows from {} ({:?})",
        table.n_rows(),
        path.display(),
        compression
    );
    Ok(table)
}

/// Parse KDD records from any reader
pub fn read_kdd<R: Read>(reader: R) -> KddResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        // The format has no quoting
        .quoting(false)
        // Field counts are checked per line below
        .flexible(true)
        .from_reader(reader);

    let mut builders: Vec<ColumnBuilder> = KDD_COLUMNS
        .iter()
        .map(|name| ColumnBuilder::for_column(name))
        .collect();

    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != COLUMN_COUNT {
            return Err(KddError::parse(
                line,
                format!("expected {} fields, found {}", COLUMN_COUNT, record.len()),
            ));
        }

        for ((field, builder), name) in record.iter().zip(builders.iter_mut()).zip(KDD_COLUMNS) {
            builder
                .push(field)
                .map_err(|msg| KddError::parse(line, format!("column '{}': {}", name, msg)))?;
        }
    }

    let columns = KDD_COLUMNS
        .iter()
        .zip(builders)
        .map(|(name, builder)| Column::new(*name, builder.finish()))
        .collect();
    Table::new(columns)
}

// ============================================================================
// COLUMN BUILDERS
// ============================================================================

/// Accumulates one column; numeric columns start as integers and widen to
/// floats on the first fractional value
enum ColumnBuilder {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<Option<String>>),
}

impl ColumnBuilder {
    fn for_column(name: &str) -> Self {
        match column_kind(name) {
            Some(ColumnKind::Numeric) => ColumnBuilder::Int(Vec::new()),
            _ => ColumnBuilder::Text(Vec::new()),
        }
    }

    fn push(&mut self, raw: &str) -> Result<(), String> {
        match self {
            ColumnBuilder::Int(values) => {
                if let Ok(v) = raw.trim().parse::<i64>() {
                    values.push(v);
                    return Ok(());
                }
                let v = parse_float(raw)?;
                let mut widened: Vec<f64> = values.iter().map(|&x| x as f64).collect();
                widened.push(v);
                *self = ColumnBuilder::Float(widened);
            }
            ColumnBuilder::Float(values) => values.push(parse_float(raw)?),
            ColumnBuilder::Text(values) => values.push(Some(raw.to_string())),
        }
        Ok(())
    }

    fn finish(self) -> ColumnData {
        match self {
            ColumnBuilder::Int(v) => ColumnData::Int(v),
            ColumnBuilder::Float(v) => ColumnData::Float(v),
            ColumnBuilder::Text(v) => ColumnData::Text(v),
        }
    }
}

fn parse_float(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", raw))
}
