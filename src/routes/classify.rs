use axum::{extract::Path, routing::get, Json, Router};

use super::{ApiError, AppState};
use crate::status::{classify, AqiStatus};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/status/{aqi}", get(handler))
}

/// `GET /status/{aqi}` - classify a raw AQI value.
async fn handler(Path(aqi): Path<i64>) -> Result<Json<AqiStatus>, ApiError> {
    // ---
    Ok(Json(classify(aqi)?))
}
