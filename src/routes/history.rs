use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{city_list, resolve_cities, ApiError, AppState};
use crate::catalog::{Comparison, DEFAULT_COMPARISON, DEFAULT_HISTORY};
use crate::generator::{generate_catalog_month, DailyAqi};
use crate::summary::MonthSummary;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/history", get(history))
        .route("/comparison", get(comparison))
}

/// Query parameters for the historical view
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Comma-separated city names; defaults to the standard history set.
    cities: Option<String>,
    /// Last day of the window (`YYYY-MM-DD`); defaults to today (UTC).
    end: Option<NaiveDate>,
}

/// Query parameters for the comparison view
#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    cities: Option<String>,
}

#[derive(Serialize)]
struct HistoryView {
    window_days: u32,
    end_date: NaiveDate,
    series: BTreeMap<String, Vec<DailyAqi>>,
    summary: MonthSummary,
}

/// `GET /history?cities=&end=` - trailing daily series per city.
async fn history(
    Query(params): Query<HistoryQuery>,
    State(state): State<AppState>,
) -> Result<Json<HistoryView>, ApiError> {
    // ---
    let names = city_list(params.cities.as_deref(), &DEFAULT_HISTORY);
    let end_date = params.end.unwrap_or_else(|| Utc::now().date_naive());
    let window_days = state.config.history_window_days;
    resolve_cities(&state.catalog, &names)?;

    let series = state.with_source(|source| {
        generate_catalog_month(&state.catalog, &names, window_days, end_date, source)
    })?;
    let summary = MonthSummary::from_series(&series, &names)?;

    info!(
        "Generated {}-day history for {} cities ending {}",
        window_days,
        series.len(),
        end_date
    );
    Ok(Json(HistoryView {
        window_days,
        end_date,
        series,
        summary,
    }))
}

/// `GET /comparison?cities=` - cities ranked by baseline AQI.
async fn comparison(
    Query(params): Query<ComparisonQuery>,
    State(state): State<AppState>,
) -> Result<Json<Comparison>, ApiError> {
    // ---
    let names = city_list(params.cities.as_deref(), &DEFAULT_COMPARISON);
    resolve_cities(&state.catalog, &names)?;
    Ok(Json(state.catalog.compare(&names)?))
}
