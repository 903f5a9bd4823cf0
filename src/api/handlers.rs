//! Request handlers for the service endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use serde_json::{Map, Value};

use crate::data::stations::StationRecord;
use crate::sim::{SimParams, simulate};

use super::AppState;
use super::types::{ErrorResponse, SimulateQuery, augmented_record};

/// Serves the landing page.
///
/// `GET /` → 200 + static HTML
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Returns the energy records exactly as loaded.
///
/// `GET /data` → 200 + JSON array, field order matching the source columns
pub async fn get_data(State(state): State<Arc<AppState>>) -> Json<Vec<Map<String, Value>>> {
    Json(state.series.records().to_vec())
}

/// Returns the cleaned station records.
///
/// `GET /stations` → 200 + JSON array, rows without coordinates omitted
pub async fn get_stations(State(state): State<Arc<AppState>>) -> Json<Vec<StationRecord>> {
    Json(state.stations.records().to_vec())
}

/// Runs the storm simulation and returns the augmented records.
///
/// `GET /simulate` → 200 + JSON array (configured default parameters)
/// `GET /simulate?stormStart=S&stormEnd=E&batteryCap=C` → parameterized run
/// `GET /simulate?batteryCap=abc` → 400 + `ErrorResponse`, nothing simulated
pub async fn get_simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
) -> impl IntoResponse {
    let defaults = &state.defaults;

    let battery_cap_kwh = match query.battery_cap {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(cap) => cap,
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("`batteryCap` must be a number, got `{raw}`"),
                    }),
                ));
            }
        },
        None => defaults.battery_cap_kwh,
    };

    let params = SimParams {
        storm_start: query
            .storm_start
            .unwrap_or_else(|| defaults.storm_start.clone()),
        storm_end: query
            .storm_end
            .unwrap_or_else(|| defaults.storm_end.clone()),
        battery_cap_kwh,
    };

    let steps = match simulate(state.series.records(), state.stations.count(), &params) {
        Ok(steps) => steps,
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ));
        }
    };

    let body: Vec<Map<String, Value>> = state
        .series
        .records()
        .iter()
        .zip(&steps)
        .map(|(source, step)| augmented_record(source, step))
        .collect();

    Ok(Json(body))
}
