//! HTTP gateway for the dashboard backend.
//!
//! Each sibling module exports a sub-router; this gateway merges them and
//! attaches the shared [`AppState`]. `main.rs` only ever sees [`router`].

use std::sync::{Arc, Mutex};

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};
use rand::rngs::StdRng;
use serde::Serialize;

use crate::error::Error;
use crate::random::RngSource;
use crate::{Catalog, Config};

mod cities;
mod classify;
mod health;
mod history;

// ---

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub catalog: Arc<Catalog>,
    pub config: Config,
    shared_rng: Option<Arc<Mutex<RngSource<StdRng>>>>,
}

impl AppState {
    // ---
    pub fn new(catalog: Catalog, config: Config) -> Self {
        // ---
        let shared_rng = config
            .rng_seed
            .map(|seed| Arc::new(Mutex::new(RngSource::seeded(seed))));

        Self {
            catalog: Arc::new(catalog),
            config,
            shared_rng,
        }
    }

    /// Run `f` against the request's random source.
    ///
    /// With a configured seed all requests draw from one shared stream, held
    /// under the lock for the whole call; otherwise each call gets a fresh
    /// entropy-seeded generator.
    pub fn with_source<T>(
        &self,
        f: impl FnOnce(&mut RngSource<StdRng>) -> crate::Result<T>,
    ) -> crate::Result<T> {
        // ---
        match &self.shared_rng {
            Some(shared) => {
                let mut guard = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                f(&mut *guard)
            }
            None => f(&mut RngSource::from_entropy()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(cities::router())
        .merge(history::router())
        .merge(classify::router())
        .merge(health::router())
        .with_state(state)
}

// ---

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Error response: status code plus a JSON `{ "error": ... }` body.
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    // ---
    pub(crate) fn not_found(err: Error) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: err.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        // ---
        tracing::debug!("Rejecting request: {}", err);
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Split a comma-separated `cities` parameter, falling back to `defaults`.
pub(crate) fn city_list(param: Option<&str>, defaults: &[&str]) -> Vec<String> {
    // ---
    let parsed: Vec<String> = param
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if parsed.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

/// Ensure every requested name exists in the catalog; unknown names are 404s.
pub(crate) fn resolve_cities<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
) -> Result<(), ApiError> {
    // ---
    for name in names {
        catalog.get(name.as_ref()).map_err(ApiError::not_found)?;
    }
    Ok(())
}
