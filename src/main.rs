//! Service entry point: CLI wiring, dataset loading, and server startup.

use std::path::Path;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use storm_sim::api::{self, AppState};
use storm_sim::config::ServerConfig;
use storm_sim::data::{EnergySeries, StationRegistry};
use storm_sim::sim::SimParams;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    data_path: Option<String>,
    stations_path: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
}

fn print_help() {
    eprintln!("storm-sim — battery-backed storm-resilience simulation service");
    eprintln!();
    eprintln!("Usage: storm-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>     Load server configuration from a TOML file");
    eprintln!("  --data <path>       Energy time-series CSV (overrides config)");
    eprintln!("  --stations <path>   Station registry CSV (overrides config)");
    eprintln!("  --bind <ip>         Bind address (overrides config)");
    eprintln!("  --port <u16>        Listen port (overrides config)");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Without --config, built-in defaults are used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        data_path: None,
        stations_path: None,
        bind: None,
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--data" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --data requires a path argument");
                    process::exit(1);
                }
                cli.data_path = Some(args[i].clone());
            }
            "--stations" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --stations requires a path argument");
                    process::exit(1);
                }
                cli.stations_path = Some(args[i].clone());
            }
            "--bind" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bind requires an address argument");
                    process::exit(1);
                }
                cli.bind = Some(args[i].clone());
            }
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = Some(p);
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storm_sim=info")),
        )
        .init();

    // Load config, then apply CLI overrides
    let mut config = if let Some(ref path) = cli.config_path {
        match ServerConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ServerConfig::default()
    };

    if let Some(path) = cli.data_path {
        config.data.energy_csv = path;
    }
    if let Some(path) = cli.stations_path {
        config.data.stations_csv = path;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // The series is required; the registry is best-effort
    let series = match EnergySeries::load(Path::new(&config.data.energy_csv)) {
        Ok(series) => series,
        Err(e) => {
            tracing::error!("cannot load energy series: {e}");
            process::exit(1);
        }
    };
    tracing::info!(
        records = series.len(),
        path = %config.data.energy_csv,
        "energy series loaded"
    );

    let stations = StationRegistry::load(Path::new(&config.data.stations_csv));
    tracing::info!(stations = stations.count(), "station registry loaded");

    let state = Arc::new(AppState {
        series,
        stations,
        defaults: SimParams::from(&config.simulation),
    });

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    rt.block_on(api::serve(state, addr));
}
