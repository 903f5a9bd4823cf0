//! API query types, error body, and wire-record assembly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sim::StepRecord;

/// Query parameters for the simulate endpoint.
///
/// All parameters are optional; omitted ones fall back to the configured
/// defaults. `batteryCap` stays a raw string here so the handler controls
/// the parse and its failure mode.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Storm window start (`HH:MM`), passed through unvalidated.
    #[serde(rename = "stormStart")]
    pub storm_start: Option<String>,
    /// Storm window end (`HH:MM`), passed through unvalidated.
    #[serde(rename = "stormEnd")]
    pub storm_end: Option<String>,
    /// Battery capacity in kWh.
    #[serde(rename = "batteryCap")]
    pub battery_cap: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Merges one engine step into its source record for serialization.
///
/// The result keeps the source columns in order, then appends `served_kW`,
/// `soc_kWh`, and one `station_<k>_kW` column per station, numbered from 1.
/// The source record itself is never modified.
pub fn augmented_record(source: &Map<String, Value>, step: &StepRecord) -> Map<String, Value> {
    let mut merged = source.clone();
    merged.insert("served_kW".to_string(), number_or_null(step.served_kw));
    merged.insert("soc_kWh".to_string(), number_or_null(step.soc_kwh));
    for (k, share) in step.station_kw.iter().enumerate() {
        merged.insert(format!("station_{}_kW", k + 1), number_or_null(*share));
    }
    merged
}

/// Converts a float to a JSON number, or null when non-finite.
fn number_or_null(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
