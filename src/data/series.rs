//! The energy time series the service serves and simulates over.

use std::path::Path;

use serde_json::{Map, Value};

use super::{DataError, Table};

/// Time-indexed grid-state records, loaded once at startup.
///
/// Records keep their source order, which is assumed to be ascending by
/// timestamp and is not re-validated. The series is immutable for the
/// process lifetime; simulation output is merged into copies, never into
/// these records.
#[derive(Debug, Clone)]
pub struct EnergySeries {
    table: Table,
}

impl EnergySeries {
    /// Loads the series from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a `DataError` when the file is missing or malformed. There
    /// is no fallback for the series; callers treat this as fatal.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        Ok(Self {
            table: Table::load(path)?,
        })
    }

    /// Grid-state records in source order.
    pub fn records(&self) -> &[Map<String, Value>] {
        self.table.records()
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` when the series holds no records.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl From<Table> for EnergySeries {
    fn from(table: Table) -> Self {
        Self { table }
    }
}
