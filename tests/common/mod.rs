//! Shared test fixtures for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temp file and returns the handle.
///
/// The file is removed when the handle drops, so callers keep the handle
/// alive for as long as the path is in use.
pub fn csv_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("fixture contents should be written");
    file.flush().expect("fixture contents should be flushed");
    file
}

/// One day of half-hourly records starting at midnight.
///
/// Load follows a smooth profile so the series reads like real demand
/// data without shipping a file on disk.
pub fn day_energy_csv() -> NamedTempFile {
    let mut contents = String::from("Datetime,load_kW\n");
    for step in 0..48 {
        let load = 2.5 + (step as f64 * 0.37).sin().abs();
        contents.push_str(&format!(
            "2021-01-01 {:02}:{:02}:00,{load:.3}\n",
            step / 2,
            (step % 2) * 30,
        ));
    }
    csv_fixture(&contents)
}

/// Station registry with three usable rows and one without coordinates.
pub fn stations_csv() -> NamedTempFile {
    csv_fixture(
        "county,station code,station name,latitude,longitude,open year\n\
         Dublin,ST-001,Ringsend,53.3437,-6.2238,1998\n\
         Cork,ST-002,Marina Point,51.8986,-8.4187,2003\n\
         Galway,ST-003,Salthill,53.2588,-9.0899,2011\n\
         Offaly,ST-008,Shannonbridge,,,2004\n",
    )
}
