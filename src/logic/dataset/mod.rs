//! Dataset Module - Record loading and tabular storage
//!
//! Loads the fixed-layout KDD connection records into an immutable
//! column table and writes derived tables back out as flat CSV files.

pub mod table;
pub mod loader;
pub mod export;

#[cfg(test)]
pub(crate) mod tests;

pub use export::write_csv;
pub use loader::{load_kdd, read_kdd, Compression};
pub use table::{Column, ColumnData, DataType, Table, Value};
