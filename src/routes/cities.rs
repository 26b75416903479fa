use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ApiError, AppState};
use crate::advisory::HotspotReport;
use crate::catalog::CityProfile;
use crate::generator::{generate_day, safe_limits, HourlyReading, PollutantLimit};
use crate::status::AqiStatus;
use crate::summary::DaySummary;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/cities", get(search))
        .route("/cities/{name}", get(profile))
        .route("/cities/{name}/day", get(day))
        .route("/cities/{name}/hotspots", get(hotspots))
}

/// Query parameters for city search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Serialize)]
struct CityView {
    #[serde(flatten)]
    profile: CityProfile,
    status: AqiStatus,
}

#[derive(Serialize)]
struct DayView {
    city: CityView,
    readings: Vec<HourlyReading>,
    summary: DaySummary,
    safe_limits: Vec<PollutantLimit>,
}

fn city_view(state: &AppState, name: &str) -> Result<CityView, ApiError> {
    // ---
    let profile = state.catalog.get(name).map_err(ApiError::not_found)?;
    Ok(CityView {
        status: profile.baseline_status()?,
        profile: profile.clone(),
    })
}

/// `GET /cities?q=` - case-insensitive search over name and country.
async fn search(
    Query(params): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CityView>>, ApiError> {
    // ---
    let query = params.q.unwrap_or_default();
    let matches = state.catalog.search(&query);
    debug!("Search {:?} matched {} cities", query, matches.len());

    let views = matches
        .into_iter()
        .map(|profile| -> Result<CityView, ApiError> {
            Ok(CityView {
                status: profile.baseline_status()?,
                profile: profile.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(views))
}

/// `GET /cities/{name}`
async fn profile(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CityView>, ApiError> {
    // ---
    Ok(Json(city_view(&state, &name)?))
}

/// `GET /cities/{name}/day` - a freshly generated 24-hour profile.
async fn day(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DayView>, ApiError> {
    // ---
    let city = city_view(&state, &name)?;
    let readings = state.with_source(|source| generate_day(city.profile.baseline_aqi, source))?;
    let summary = DaySummary::from_readings(&readings)?;

    info!(
        "Generated day for {}: mean {:.1}, peak {} at {}",
        name, summary.mean_aqi, summary.peak.aqi, summary.peak.hour_label
    );
    Ok(Json(DayView {
        city,
        readings,
        summary,
        safe_limits: safe_limits(),
    }))
}

/// `GET /cities/{name}/hotspots` - 404 when the city has no hotspot data.
async fn hotspots(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HotspotReport>, ApiError> {
    // ---
    state.catalog.get(&name).map_err(ApiError::not_found)?;

    match HotspotReport::for_city(&state.catalog, &name)? {
        Some(report) => Ok(Json(report)),
        None => Err(ApiError::not_found(crate::Error::invalid(format!(
            "no hotspot data for '{name}'"
        )))),
    }
}
