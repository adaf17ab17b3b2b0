//! In-memory column table
//!
//! Columns are typed vectors of equal length. Every transform returns a new
//! table; nothing mutates a table handed in by the caller.

use std::collections::{HashMap, HashSet};

use crate::error::{KddError, KddResult};

// ============================================================================
// CELL VALUES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Float,
    Text,
}

/// Borrowed view of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    Null,
}

impl Value<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => Ok(()),
        }
    }
}

// ============================================================================
// COLUMN DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    /// Strings with explicit nulls
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        match self {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Text(_) => DataType::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnData::Text(_))
    }

    pub fn get(&self, row: usize) -> Option<Value<'_>> {
        match self {
            ColumnData::Int(v) => v.get(row).map(|x| Value::Int(*x)),
            ColumnData::Float(v) => v.get(row).map(|x| {
                if x.is_nan() {
                    Value::Null
                } else {
                    Value::Float(*x)
                }
            }),
            ColumnData::Text(v) => v
                .get(row)
                .map(|x| x.as_deref().map_or(Value::Null, Value::Text)),
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            ColumnData::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric values widened to f64, `None` for text columns
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Int(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            ColumnData::Text(_) => None,
        }
    }

    /// Gather rows by index; indices must be in bounds
    fn gather(&self, indices: &[usize]) -> ColumnData {
        match self {
            ColumnData::Int(v) => ColumnData::Int(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float(v) => ColumnData::Float(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Number of distinct non-null values
    pub fn n_unique(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.iter().collect::<HashSet<_>>().len(),
            ColumnData::Float(v) => v
                .iter()
                .filter(|x| !x.is_nan())
                // -0.0 and 0.0 compare equal
                .map(|x| if *x == 0.0 { 0u64 } else { x.to_bits() })
                .collect::<HashSet<_>>()
                .len(),
            ColumnData::Text(v) => v.iter().flatten().collect::<HashSet<_>>().len(),
        }
    }

    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Int(_) => 0,
            ColumnData::Float(v) => v.iter().filter(|x| x.is_nan()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }
}

// ============================================================================
// COLUMN
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn n_unique(&self) -> usize {
        self.data.n_unique()
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table; all columns must have the same length and distinct names
    pub fn new(columns: Vec<Column>) -> KddResult<Self> {
        let n_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(KddError::InvalidArgument(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
            if column.len() != n_rows {
                return Err(KddError::ShapeMismatch {
                    column: column.name.clone(),
                    expected: n_rows,
                    actual: column.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Table with `n_rows` rows and no columns
    pub fn empty(n_rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            n_rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like `column`, but a missing column is an error
    pub fn require(&self, name: &str) -> KddResult<&Column> {
        self.column(name)
            .ok_or_else(|| KddError::ColumnNotFound(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Copy of the table with `column` replacing the same-named column, or appended
    ///
    /// A table with no columns and no rows accepts a column of any length.
    pub fn with_column(&self, column: Column) -> KddResult<Table> {
        let shaped = !self.columns.is_empty() || self.n_rows > 0;
        if shaped && column.len() != self.n_rows {
            let actual = column.len();
            return Err(KddError::ShapeMismatch {
                column: column.name,
                expected: self.n_rows,
                actual,
            });
        }

        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => columns.push(column),
        }
        Table::new(columns)
    }

    /// Copy without the named columns; names that are absent are ignored
    pub fn drop_columns(&self, names: &[&str]) -> Table {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|c| !names.contains(&c.name.as_str()))
            .cloned()
            .collect();
        // Row count survives even when every column is dropped
        Table {
            columns,
            n_rows: self.n_rows,
        }
    }

    /// Copy restricted to `names`, in that order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> KddResult<Table> {
        let columns = names
            .iter()
            .map(|n| self.require(n.as_ref()).cloned())
            .collect::<KddResult<Vec<_>>>()?;
        Ok(Table {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// Copy containing the given rows, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> KddResult<Table> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(KddError::InvalidArgument(format!(
                "row index {} out of bounds for {} rows",
                bad, self.n_rows
            )));
        }

        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.gather(indices)))
            .collect();
        Ok(Table {
            columns,
            n_rows: indices.len(),
        })
    }

    /// Copy containing the rows where `mask` is true
    pub fn filter_rows(&self, mask: &[bool]) -> KddResult<Table> {
        if mask.len() != self.n_rows {
            return Err(KddError::InvalidArgument(format!(
                "mask has {} entries for {} rows",
                mask.len(),
                self.n_rows
            )));
        }

        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        self.take_rows(&indices)
    }

    /// Non-null value frequencies, most frequent first (ties by value)
    pub fn value_counts(&self, name: &str) -> KddResult<Vec<(String, usize)>> {
        let data = &self.require(name)?.data;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for row in 0..self.n_rows {
            if let Some(value) = data.get(row).filter(|v| !v.is_null()) {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }
}
