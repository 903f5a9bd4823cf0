//! Core simulation types: rate constants, run parameters, and step output.

/// Battery discharge per step while the storm window is active (kWh).
///
/// Rates apply once per record regardless of the wall-clock gap between
/// timestamps; the series cadence sets the effective power.
pub const DISCHARGE_KWH_PER_STEP: f64 = 0.01;

/// Battery recharge per step outside the storm window (kWh).
pub const RECHARGE_KWH_PER_STEP: f64 = 0.005;

/// Station count substituted when the registry holds no stations.
pub const FALLBACK_STATION_COUNT: usize = 5;

/// Default storm window start (`HH:MM`).
pub const DEFAULT_STORM_START: &str = "02:00";

/// Default storm window end (`HH:MM`, inclusive).
pub const DEFAULT_STORM_END: &str = "08:00";

/// Default battery capacity (kWh).
pub const DEFAULT_BATTERY_CAP_KWH: f64 = 5.0;

/// Parameters for one simulation run.
#[derive(Debug, Clone)]
pub struct SimParams {
    /// Storm window start, `HH:MM` 24-hour wall-clock.
    pub storm_start: String,
    /// Storm window end, `HH:MM` 24-hour wall-clock (inclusive).
    pub storm_end: String,
    /// Battery capacity in kWh. Non-positive values are accepted and
    /// yield a battery that never discharges.
    pub battery_cap_kwh: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            storm_start: DEFAULT_STORM_START.to_string(),
            storm_end: DEFAULT_STORM_END.to_string(),
            battery_cap_kwh: DEFAULT_BATTERY_CAP_KWH,
        }
    }
}

/// Engine output for one input record.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Battery supply delivered this step (kW).
    pub served_kw: f64,
    /// State of charge after this step (kWh).
    pub soc_kwh: f64,
    /// Even split of `served_kw` across the run's stations (kW each).
    pub station_kw: Vec<f64>,
}
