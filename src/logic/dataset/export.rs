use std::path::Path;

use super::table::Table;
use crate::error::KddResult;

/// Write a table as CSV with a header row; nulls become empty fields.
/// Returns the number of data rows written.
pub fn write_csv(table: &Table, target_path: impl AsRef<Path>) -> KddResult<usize> {
    let target_path = target_path.as_ref();

    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(target_path)?;
    writer.write_record(table.column_names())?;

    let mut fields: Vec<String> = Vec::with_capacity(table.n_cols());
    for row in 0..table.n_rows() {
        fields.clear();
        for column in table.columns() {
            let field = column
                .data
                .get(row)
                .map(|v| v.to_string())
                .unwrap_or_default();
            fields.push(field);
        }
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    log::info!("Exported {} rows to {}", table.n_rows(), target_path.display());
    Ok(table.n_rows())
}
