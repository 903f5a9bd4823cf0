//! HTTP API for the storm-resilience service.
//!
//! Provides four GET endpoints:
//! - `/`: landing page
//! - `/data`: energy records exactly as loaded
//! - `/stations`: cleaned station locations
//! - `/simulate`: battery simulation over the full series

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::data::{EnergySeries, StationRegistry};
use crate::sim::SimParams;

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup from the loaded datasets and wrapped in
/// `Arc` — no locks needed since all data is read-only. Simulation runs
/// keep their battery state on the request stack, never here.
pub struct AppState {
    /// Energy time series served and simulated.
    pub series: EnergySeries,
    /// Charging-station registry.
    pub stations: StationRegistry,
    /// Default parameters for the simulate endpoint.
    pub defaults: SimParams,
}

/// Builds the axum router with all service routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/data", get(handlers::get_data))
        .route("/stations", get(handlers::get_stations))
        .route("/simulate", get(handlers::get_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
