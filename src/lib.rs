//! Synthetic air-quality engine behind the `airquality-dash` service.
//!
//! The core is a pure in-memory library:
//! - [`status`] classifies an AQI value into one of five categories
//! - [`generator`] builds 24-hour pollutant profiles and trailing daily series
//!   from a city's baseline AQI, drawing noise from an injected
//!   [`RandomSource`]
//! - [`catalog`] holds the immutable city table, search and comparison
//! - [`advisory`] carries hotspot data, mask and health guidance
//! - [`summary`] derives headline aggregates from generated series
//!
//! `config` and `routes` form the thin HTTP layer used by the binary.

pub mod advisory;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod random;
pub mod routes;
pub mod status;
pub mod summary;

pub use catalog::{Catalog, CityProfile};
pub use config::Config;
pub use error::{Error, Result};
pub use generator::{generate_day, generate_month, DailyAqi, HourlyReading, Pollutant};
pub use random::{MidpointSource, RandomSource, RngSource};
pub use status::{classify, AqiCategory, AqiStatus};
