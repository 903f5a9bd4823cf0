//! Simulation engine stepping the battery across the energy series.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use thiserror::Error;

use super::battery::Battery;
use super::fan_out::fan_out;
use super::types::{
    DISCHARGE_KWH_PER_STEP, FALLBACK_STATION_COUNT, RECHARGE_KWH_PER_STEP, SimParams, StepRecord,
};
use super::window::StormWindow;

/// Column holding each record's timestamp.
pub const TIMESTAMP_COLUMN: &str = "Datetime";

/// Timestamp layouts accepted for the [`TIMESTAMP_COLUMN`] value.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Errors that abort a simulation run.
///
/// Any timestamp problem fails the whole run; skipping the offending
/// record would desynchronize the output from the input series.
#[derive(Debug, Error)]
pub enum SimulateError {
    /// A record has no usable timestamp value at all.
    #[error("record {index} has no `Datetime` value")]
    MissingTimestamp { index: usize },

    /// A record's timestamp value could not be parsed.
    #[error("record {index} has unparseable `Datetime` value `{value}`")]
    InvalidTimestamp { index: usize, value: String },
}

/// Simulation engine owning the battery, storm window, and station count.
///
/// One engine instance serves exactly one run: the battery starts full
/// and is stepped once per input record, in order.
#[derive(Debug)]
pub struct Engine {
    battery: Battery,
    window: StormWindow,
    station_count: usize,
    index: usize,
}

impl Engine {
    /// Creates an engine for one run.
    ///
    /// A `station_count` of zero (an empty registry) is replaced with
    /// [`FALLBACK_STATION_COUNT`].
    pub fn new(params: &SimParams, station_count: usize) -> Self {
        let station_count = if station_count == 0 {
            FALLBACK_STATION_COUNT
        } else {
            station_count
        };
        Self {
            battery: Battery::full(params.battery_cap_kwh),
            window: StormWindow::new(params.storm_start.clone(), params.storm_end.clone()),
            station_count,
            index: 0,
        }
    }

    /// Number of stations the supply fans out across.
    pub fn station_count(&self) -> usize {
        self.station_count
    }

    /// Executes one timestep over `record` and returns its output.
    ///
    /// The battery discharges only while the record's wall-clock time
    /// falls inside the storm window and charge remains; otherwise it
    /// recharges. A drained battery therefore starts recharging even
    /// mid-storm.
    ///
    /// # Errors
    ///
    /// Returns a `SimulateError` when the record's timestamp is missing
    /// or unparseable.
    pub fn step(&mut self, record: &Map<String, Value>) -> Result<StepRecord, SimulateError> {
        let index = self.index;
        self.index += 1;

        let time_of_day = record_time_of_day(record, index)?;

        let supplied = if self.window.contains(&time_of_day) && self.battery.can_discharge() {
            self.battery.discharge(DISCHARGE_KWH_PER_STEP)
        } else {
            self.battery.recharge(RECHARGE_KWH_PER_STEP);
            0.0
        };

        Ok(StepRecord {
            served_kw: supplied,
            soc_kwh: self.battery.soc_kwh,
            station_kw: fan_out(supplied, self.station_count),
        })
    }

    /// Steps every record in order and returns the per-step outputs.
    ///
    /// # Errors
    ///
    /// Returns the first `SimulateError` encountered; no partial output
    /// is produced.
    pub fn run(&mut self, records: &[Map<String, Value>]) -> Result<Vec<StepRecord>, SimulateError> {
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            results.push(self.step(record)?);
        }
        Ok(results)
    }
}

/// Runs one complete simulation over `records`.
///
/// # Arguments
///
/// * `records` - Grid-state records in ascending time order
/// * `station_count` - Registry count; zero selects the fallback
/// * `params` - Storm window and battery capacity for this run
///
/// # Errors
///
/// Returns a `SimulateError` when any record's timestamp is missing or
/// unparseable.
pub fn simulate(
    records: &[Map<String, Value>],
    station_count: usize,
    params: &SimParams,
) -> Result<Vec<StepRecord>, SimulateError> {
    let mut engine = Engine::new(params, station_count);
    engine.run(records)
}

/// Extracts one record's timestamp and formats it as zero-padded `HH:MM`.
fn record_time_of_day(record: &Map<String, Value>, index: usize) -> Result<String, SimulateError> {
    let raw = match record.get(TIMESTAMP_COLUMN) {
        None | Some(Value::Null) => return Err(SimulateError::MissingTimestamp { index }),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let ts = parse_timestamp(&raw).ok_or(SimulateError::InvalidTimestamp { index, value: raw })?;
    Ok(ts.format("%H:%M").to_string())
}

/// Parses a timestamp in any accepted layout. Bare dates become midnight.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
