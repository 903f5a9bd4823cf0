//! TOML-based server configuration.

use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::sim::types::{
    DEFAULT_BATTERY_CAP_KWH, DEFAULT_STORM_END, DEFAULT_STORM_START, SimParams,
};

/// Top-level server configuration parsed from TOML.
///
/// All fields have defaults matching the stock deployment, so an absent
/// or empty config file yields a runnable server. Load from TOML with
/// [`ServerConfig::from_toml_file`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// HTTP listener parameters.
    #[serde(default)]
    pub server: HttpConfig,
    /// Dataset file locations.
    #[serde(default)]
    pub data: DataConfig,
    /// Default parameters for the simulate endpoint.
    #[serde(default)]
    pub simulation: SimulationDefaults,
}

/// HTTP listener parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Bind address (IP literal).
    pub bind: String,
    /// Listen port.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Dataset file locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Energy time-series CSV path.
    pub energy_csv: String,
    /// Station registry CSV path.
    pub stations_csv: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            energy_csv: "data/energy_timeseries.csv".to_string(),
            stations_csv: "static/station_details.csv".to_string(),
        }
    }
}

/// Default parameters for the simulate endpoint.
///
/// The window bounds stay unvalidated strings; the simulate endpoint
/// accepts arbitrary values for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationDefaults {
    /// Storm window start (`HH:MM`).
    pub storm_start: String,
    /// Storm window end (`HH:MM`, inclusive).
    pub storm_end: String,
    /// Battery capacity (kWh).
    pub battery_cap_kwh: f64,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            storm_start: DEFAULT_STORM_START.to_string(),
            storm_end: DEFAULT_STORM_END.to_string(),
            battery_cap_kwh: DEFAULT_BATTERY_CAP_KWH,
        }
    }
}

impl From<&SimulationDefaults> for SimParams {
    fn from(defaults: &SimulationDefaults) -> Self {
        Self {
            storm_start: defaults.storm_start.clone(),
            storm_end: defaults.storm_end.clone(),
            battery_cap_kwh: defaults.battery_cap_kwh,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.bind"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} - {}", self.field, self.message)
    }
}

impl ServerConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Combines the bind address and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the bind address is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.bind.parse().map_err(|_| ConfigError {
            field: "server.bind".to_string(),
            message: format!("must be an IP address, got \"{}\"", self.server.bind),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.bind.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.bind".into(),
                message: format!("must be an IP address, got \"{}\"", self.server.bind),
            });
        }

        if self.data.energy_csv.is_empty() {
            errors.push(ConfigError {
                field: "data.energy_csv".into(),
                message: "must not be empty".into(),
            });
        }
        if self.data.stations_csv.is_empty() {
            errors.push(ConfigError {
                field: "data.stations_csv".into(),
                message: "must not be empty".into(),
            });
        }

        let sim = &self.simulation;
        if !sim.battery_cap_kwh.is_finite() || sim.battery_cap_kwh < 0.0 {
            errors.push(ConfigError {
                field: "simulation.battery_cap_kwh".into(),
                message: "must be finite and >= 0".into(),
            });
        }

        errors
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: HttpConfig::default(),
            data: DataConfig::default(),
            simulation: SimulationDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_valid() {
        let cfg = ServerConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.simulation.storm_start, "02:00");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[server]
bind = "127.0.0.1"
port = 8080

[data]
energy_csv = "fixtures/energy.csv"
stations_csv = "fixtures/stations.csv"

[simulation]
storm_start = "03:00"
storm_end = "09:30"
battery_cap_kwh = 2.5
"#;
        let cfg = ServerConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(8080));
        assert_eq!(
            cfg.as_ref().map(|c| &*c.data.energy_csv),
            Some("fixtures/energy.csv")
        );
        assert_eq!(cfg.as_ref().map(|c| c.simulation.battery_cap_kwh), Some(2.5));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[server]
port = 9000
"#;
        let cfg = ServerConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // port overridden
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(9000));
        // bind kept default
        assert_eq!(cfg.as_ref().map(|c| &*c.server.bind), Some("0.0.0.0"));
        // simulation kept default
        assert_eq!(cfg.as_ref().map(|c| &*c.simulation.storm_end), Some("08:00"));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[server]
port = 9000
bogus_field = true
"#;
        let result = ServerConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn from_toml_file_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7000").unwrap();
        file.flush().unwrap();

        let cfg = ServerConfig::from_toml_file(file.path());
        assert!(cfg.is_ok());
        assert_eq!(cfg.ok().map(|c| c.server.port), Some(7000));
    }

    #[test]
    fn from_toml_file_missing_file_is_error() {
        let err = ServerConfig::from_toml_file(Path::new("/nonexistent/server.toml"));
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("cannot read"));
    }

    #[test]
    fn validation_catches_bad_bind() {
        let mut cfg = ServerConfig::default();
        cfg.server.bind = "not-an-ip".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "server.bind"));
    }

    #[test]
    fn validation_catches_empty_data_paths() {
        let mut cfg = ServerConfig::default();
        cfg.data.energy_csv = String::new();
        cfg.data.stations_csv = String::new();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "data.energy_csv"));
        assert!(errors.iter().any(|e| e.field == "data.stations_csv"));
    }

    #[test]
    fn validation_catches_bad_battery_cap() {
        let mut cfg = ServerConfig::default();
        cfg.simulation.battery_cap_kwh = -1.0;
        assert!(!cfg.validate().is_empty());

        cfg.simulation.battery_cap_kwh = f64::NAN;
        assert!(!cfg.validate().is_empty());
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let mut cfg = ServerConfig::default();
        cfg.server.bind = "127.0.0.1".to_string();
        cfg.server.port = 8080;
        let addr = cfg.bind_addr();
        assert_eq!(addr.ok().map(|a| a.to_string()), Some("127.0.0.1:8080".to_string()));
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let mut cfg = ServerConfig::default();
        cfg.server.bind = "localhost".to_string();
        assert!(cfg.bind_addr().is_err());
    }

    #[test]
    fn sim_params_from_defaults() {
        let defaults = SimulationDefaults::default();
        let params = SimParams::from(&defaults);
        assert_eq!(params.storm_start, "02:00");
        assert_eq!(params.storm_end, "08:00");
        assert_eq!(params.battery_cap_kwh, 5.0);
    }
}
