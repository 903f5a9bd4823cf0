//! Even fan-out of one aggregate supply across stations.

/// Splits `supply_kw` evenly across `station_count` stations.
///
/// Every station receives `supply_kw / station_count`, so the shares sum
/// back to the aggregate within floating-point tolerance.
///
/// # Arguments
///
/// * `supply_kw` - Aggregate battery supply for the step (kW)
/// * `station_count` - Number of stations sharing it
///
/// # Panics
///
/// Panics if `station_count` is zero. Callers substitute the fallback
/// count for an empty registry before reaching here.
pub fn fan_out(supply_kw: f64, station_count: usize) -> Vec<f64> {
    assert!(station_count > 0, "station_count must be > 0");
    vec![supply_kw / station_count as f64; station_count]
}
