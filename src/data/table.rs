//! Generic CSV table loading with per-column type inference.

use std::fs::File;
use std::path::Path;

use serde_json::{Map, Value};

use super::DataError;

/// How every cell in one column is interpreted.
///
/// A column is an integer column only when all of its cells parse as `i64`
/// and none are empty; an empty cell anywhere demotes it to float so the
/// gaps can be represented as null. A column with any non-numeric cell is
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

/// An in-memory CSV table with typed cells and source ordering.
///
/// Each record is a `serde_json::Map` keyed by column name, inserted in
/// header order, so serializing a record reproduces the source column
/// layout. Numeric cells become JSON numbers, empty cells in numeric
/// columns become null, and text cells pass through verbatim.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Map<String, Value>>,
}

impl Table {
    /// Loads a CSV table from a file.
    ///
    /// # Arguments
    ///
    /// * `path` - Source CSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns a `DataError` if the file cannot be opened, is not
    /// well-formed CSV, or lacks a header row.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| DataError::Read {
            path: label.clone(),
            source,
        })?;
        Self::from_reader(file, &label)
    }

    /// Loads a CSV table from any reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - Source implementing `Read`
    /// * `label` - Name used in error messages (usually the file path)
    ///
    /// # Errors
    ///
    /// Returns a `DataError` if the input is not well-formed CSV or lacks
    /// a header row.
    pub fn from_reader(reader: impl std::io::Read, label: &str) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|source| DataError::Csv {
            path: label.to_string(),
            source,
        })?;
        if headers.is_empty() {
            return Err(DataError::MissingHeader {
                path: label.to_string(),
            });
        }
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|source| DataError::Csv {
                path: label.to_string(),
                source,
            })?;
            rows.push(record);
        }

        let kinds: Vec<ColumnKind> = (0..columns.len())
            .map(|col| infer_kind(&rows, col))
            .collect();

        let records = rows
            .iter()
            .map(|row| {
                let mut map = Map::new();
                for (col, name) in columns.iter().enumerate() {
                    map.insert(name.clone(), convert_cell(row.get(col).unwrap_or(""), kinds[col]));
                }
                map
            })
            .collect();

        Ok(Self { columns, records })
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in source order.
    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    /// Number of data records (excluding the header).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table has no data records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scans one column and decides how its cells are typed.
fn infer_kind(rows: &[csv::StringRecord], col: usize) -> ColumnKind {
    let mut has_empty = false;
    let mut all_int = true;

    for row in rows {
        let cell = row.get(col).unwrap_or("");
        if cell.is_empty() {
            has_empty = true;
            continue;
        }
        let trimmed = cell.trim();
        if all_int && trimmed.parse::<i64>().is_err() {
            all_int = false;
        }
        if trimmed.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }

    if all_int && !has_empty {
        ColumnKind::Int
    } else {
        ColumnKind::Float
    }
}

/// Converts one raw cell according to its column kind.
///
/// Empty cells become null. Non-finite floats have no JSON representation
/// and also become null.
fn convert_cell(cell: &str, kind: ColumnKind) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match kind {
        ColumnKind::Int => cell
            .trim()
            .parse::<i64>()
            .map_or(Value::Null, |n| Value::Number(n.into())),
        ColumnKind::Float => cell
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number),
        ColumnKind::Text => Value::String(cell.to_string()),
    }
}
