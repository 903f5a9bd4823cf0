//! Dataset loading: CSV tables, the energy time series, and the station registry.

pub mod series;
/// Charging-station registry with coordinate validation.
pub mod stations;
/// Generic CSV table with per-column type inference.
pub mod table;

// Re-export the main types for convenience
pub use series::EnergySeries;
pub use stations::StationRegistry;
pub use table::Table;

use thiserror::Error;

/// Errors raised while loading a dataset from disk.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file opened but its contents are not well-formed CSV.
    #[error("invalid CSV in `{path}`: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The file has no header row to name its columns.
    #[error("`{path}` has no header row")]
    MissingHeader { path: String },

    /// A column the caller requires is absent from the header.
    #[error("`{path}` is missing required column `{column}`")]
    MissingColumn { path: String, column: String },
}
