//! Charging-station registry with header normalization and coordinate checks.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{DataError, Table};

/// One cleaned charging-station record.
///
/// Coordinates are guaranteed finite; the remaining fields carry whatever
/// the source file held (text, number, or null) under the source column
/// names. Serialized keys match the upstream dataset, spaces included.
#[derive(Debug, Clone, Serialize)]
pub struct StationRecord {
    pub county: Value,
    #[serde(rename = "station code")]
    pub station_code: Value,
    #[serde(rename = "station name")]
    pub station_name: Value,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "open year")]
    pub open_year: Value,
}

/// Station locations loaded once at startup.
///
/// The registry is best-effort: a missing or malformed file yields an
/// empty registry rather than an error, and individual rows without
/// usable coordinates are dropped. The simulation only consumes the
/// retained-record count; the records themselves feed the stations
/// endpoint.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    records: Vec<StationRecord>,
}

impl StationRegistry {
    /// Loads the registry, degrading to empty on any failure.
    ///
    /// Failures are logged and swallowed; callers never see them.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(err) => {
                tracing::warn!("station registry unavailable, continuing without it: {err}");
                Self::default()
            }
        }
    }

    /// Fallible loader behind [`StationRegistry::load`].
    ///
    /// # Errors
    ///
    /// Returns a `DataError` when the file cannot be read, is not valid
    /// CSV, or lacks a latitude/longitude column.
    pub fn try_load(path: &Path) -> Result<Self, DataError> {
        let table = Table::load(path)?;
        Self::from_table(&table, &path.display().to_string())
    }

    /// Builds a registry from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns a `DataError` when the input is not valid CSV or lacks a
    /// latitude/longitude column.
    pub fn from_reader(reader: impl std::io::Read, label: &str) -> Result<Self, DataError> {
        let table = Table::from_reader(reader, label)?;
        Self::from_table(&table, label)
    }

    fn from_table(table: &Table, label: &str) -> Result<Self, DataError> {
        let normalized: Vec<String> = table
            .columns()
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();
        for required in ["latitude", "longitude"] {
            if !normalized.iter().any(|name| name == required) {
                return Err(DataError::MissingColumn {
                    path: label.to_string(),
                    column: required.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in table.records() {
            let fields = normalize_row(table.columns(), &normalized, row);
            match station_from_fields(&fields) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::warn!("dropped {dropped} station rows without usable coordinates");
        }

        Ok(Self { records })
    }

    /// Retained station records in source order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// Number of retained stations.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no stations were retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Re-keys one row under trimmed, lowercased column names.
fn normalize_row(
    columns: &[String],
    normalized: &[String],
    row: &Map<String, Value>,
) -> Map<String, Value> {
    let mut fields = Map::new();
    for (original, lowered) in columns.iter().zip(normalized) {
        let value = row.get(original).cloned().unwrap_or(Value::Null);
        fields.insert(lowered.clone(), value);
    }
    fields
}

fn station_from_fields(fields: &Map<String, Value>) -> Option<StationRecord> {
    let latitude = coerce_coordinate(fields.get("latitude"))?;
    let longitude = coerce_coordinate(fields.get("longitude"))?;

    let field = |name: &str| fields.get(name).cloned().unwrap_or(Value::Null);
    Some(StationRecord {
        county: field("county"),
        station_code: field("station code"),
        station_name: field("station name"),
        latitude,
        longitude,
        open_year: field("open year"),
    })
}

/// Coerces a loaded cell to a finite coordinate, if possible.
///
/// Numbers pass through; strings parse after trimming; anything else is
/// treated as missing.
fn coerce_coordinate(value: Option<&Value>) -> Option<f64> {
    let coord = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    coord.is_finite().then_some(coord)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn registry(csv: &str) -> StationRegistry {
        StationRegistry::from_reader(csv.as_bytes(), "stations.csv").unwrap()
    }

    #[test]
    fn valid_rows_are_retained_in_order() {
        let reg = registry(
            "county,station code,station name,latitude,longitude,open year\n\
             Dublin,ST01,Poolbeg,53.34,-6.21,2019\n\
             Cork,ST02,Marina,51.90,-8.46,2021\n",
        );
        assert_eq!(reg.count(), 2);
        assert_eq!(reg.records()[0].latitude, 53.34);
        assert_eq!(reg.records()[1].county, serde_json::json!("Cork"));
        assert_eq!(reg.records()[1].open_year, serde_json::json!(2021));
    }

    #[test]
    fn headers_are_trimmed_and_lowercased() {
        let reg = registry(
            " County , Station Code , STATION NAME , Latitude , Longitude , Open Year \n\
             Galway,ST03,Salthill,53.26,-9.07,2020\n",
        );
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.records()[0].station_name, serde_json::json!("Salthill"));
    }

    #[test]
    fn string_coordinates_parse_after_trimming() {
        let reg = registry(
            "county,station code,station name,latitude,longitude,open year\n\
             Dublin,ST01,Poolbeg, 53.34 ,x,2019\n\
             Cork,ST02,Marina, 51.90 , -8.46 ,2021\n",
        );
        // Row one has a non-numeric longitude and is dropped.
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.records()[0].latitude, 51.90);
        assert_eq!(reg.records()[0].longitude, -8.46);
    }

    #[test]
    fn rows_without_coordinates_are_dropped() {
        let reg = registry(
            "county,station code,station name,latitude,longitude,open year\n\
             Dublin,ST01,Poolbeg,,-6.21,2019\n\
             Cork,ST02,Marina,51.90,-8.46,2021\n\
             Mayo,ST03,Westport,inf,-9.52,2022\n",
        );
        assert_eq!(reg.count(), 1);
        assert_eq!(reg.records()[0].station_code, serde_json::json!("ST02"));
    }

    #[test]
    fn missing_coordinate_column_is_an_error() {
        let input = "county,latitude\nDublin,53.3\n";
        let err = StationRegistry::from_reader(input.as_bytes(), "stations.csv");
        assert!(matches!(err, Err(DataError::MissingColumn { .. })));
    }

    #[test]
    fn absent_optional_columns_become_null() {
        let reg = registry("latitude,longitude\n53.3,-6.2\n");
        assert_eq!(reg.records()[0].county, Value::Null);
        assert_eq!(reg.records()[0].open_year, Value::Null);
    }

    #[test]
    fn load_degrades_to_empty_on_missing_file() {
        let reg = StationRegistry::load(Path::new("/nonexistent/stations.csv"));
        assert!(reg.is_empty());
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "county,station code,station name,latitude,longitude,open year").unwrap();
        writeln!(file, "Dublin,ST01,Poolbeg,53.34,-6.21,2019").unwrap();
        file.flush().unwrap();

        let reg = StationRegistry::load(file.path());
        assert_eq!(reg.count(), 1);
    }

    #[test]
    fn serialized_keys_match_source_columns() {
        let reg = registry(
            "county,station code,station name,latitude,longitude,open year\n\
             Dublin,ST01,Poolbeg,53.34,-6.21,2019\n",
        );
        let json = serde_json::to_value(&reg.records()[0]).unwrap();
        assert!(json.get("station code").is_some());
        assert!(json.get("station name").is_some());
        assert!(json.get("open year").is_some());
        assert_eq!(json["latitude"], serde_json::json!(53.34));
    }
}
