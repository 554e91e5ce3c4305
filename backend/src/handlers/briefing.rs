//! HTTP handlers for airport and route briefings

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{normalize_station_id, BriefingRecord, RouteBriefing};

use crate::error::{AppError, AppResult};
use crate::AppState;

fn station_param(field: &str, value: &str) -> AppResult<String> {
    normalize_station_id(value).map_err(|message| AppError::validation(field, message))
}

/// Get the briefing for one airport
pub async fn get_airport_briefing(
    State(state): State<AppState>,
    Path(station): Path<String>,
) -> AppResult<Json<BriefingRecord>> {
    let station = station_param("station", &station)?;
    let record = state.briefings.airport_briefing(&station).await;
    Ok(Json(record))
}

/// Get departure and arrival briefings for a route
pub async fn get_route_briefing(
    State(state): State<AppState>,
    Path((departure, arrival)): Path<(String, String)>,
) -> AppResult<Json<RouteBriefing>> {
    let departure = station_param("departure", &departure)?;
    let arrival = station_param("arrival", &arrival)?;
    let route = state.briefings.route_briefing(&departure, &arrival).await;
    Ok(Json(route))
}
