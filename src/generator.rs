//! Synthetic AQI series generation.
//!
//! Turns a city's baseline AQI into:
//! - a 24-hour profile shaped by a fixed diurnal multiplier table, with six
//!   pollutant concentrations derived from each hour's AQI
//! - a trailing daily series (30 days by default), oldest first
//!
//! All values are truncated toward zero after scaling (floor on non-negative
//! inputs). Every call is all-or-nothing: the first failed draw aborts the
//! whole sequence.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::random::{draw, RandomSource};

// ---

/// Hours in a generated day.
pub const HOURS_PER_DAY: u32 = 24;

/// Default trailing window for monthly series.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Hourly multiplier noise range.
pub const HOURLY_NOISE: (f64, f64) = (0.92, 1.08);

/// Per-pollutant noise range.
pub const POLLUTANT_NOISE: (f64, f64) = (0.95, 1.05);

/// Daily noise range for monthly series.
pub const DAILY_NOISE: (f64, f64) = (0.85, 1.15);

/// Pollutants reported with every hourly reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    // ---
    /// Generation order; also the order noise is drawn in.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Fixed concentration-to-AQI ratio.
    pub fn ratio(&self) -> f64 {
        // ---
        match self {
            Pollutant::Pm25 => 0.65,
            Pollutant::Pm10 => 0.85,
            Pollutant::No2 => 0.28,
            Pollutant::So2 => 0.15,
            Pollutant::Co => 0.12,
            Pollutant::O3 => 0.22,
        }
    }

    /// Reference safe limit shown next to current levels.
    pub fn safe_limit(&self) -> u32 {
        // ---
        match self {
            Pollutant::Pm25 => 60,
            Pollutant::Pm10 => 100,
            Pollutant::No2 => 80,
            Pollutant::So2 => 80,
            Pollutant::Co => 4,
            Pollutant::O3 => 100,
        }
    }
}

/// A pollutant paired with its reference safe limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollutantLimit {
    pub pollutant: Pollutant,
    pub safe_limit: u32,
}

/// Safe limits for every pollutant, in [`Pollutant::ALL`] order.
pub fn safe_limits() -> Vec<PollutantLimit> {
    // ---
    Pollutant::ALL
        .into_iter()
        .map(|pollutant| PollutantLimit {
            pollutant,
            safe_limit: pollutant.safe_limit(),
        })
        .collect()
}

/// One hour of a generated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyReading {
    // ---
    pub hour: u32,
    pub hour_label: String,
    pub aqi: i64,
    pub pm25: i64,
    pub pm10: i64,
    pub no2: i64,
    pub so2: i64,
    pub co: i64,
    pub o3: i64,
}

impl HourlyReading {
    // ---
    pub fn pollutant(&self, pollutant: Pollutant) -> i64 {
        // ---
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

/// One day of a monthly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAqi {
    // ---
    pub date: NaiveDate,
    /// `DD/MM`
    pub date_label: String,
    pub aqi: i64,
}

/// Time-of-day multiplier for `hour` (0..=23).
///
/// | hours       | multiplier |
/// |-------------|------------|
/// | 7-10        | 1.30       |
/// | 18-21       | 1.15       |
/// | 23, 0-5     | 0.70       |
/// | 13-16       | 0.85       |
/// | otherwise   | 1.00       |
pub fn diurnal_multiplier(hour: u32) -> f64 {
    // ---
    match hour {
        7..=10 => 1.30,
        18..=21 => 1.15,
        23 | 0..=5 => 0.70,
        13..=16 => 0.85,
        _ => 1.00,
    }
}

/// `floor(value * factor * noise)`, rejecting results that do not fit in `i64`.
fn scale(value: i64, factor: f64, noise: f64) -> Result<i64> {
    // ---
    let scaled = (value as f64 * factor * noise).floor();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if !scaled.is_finite() || scaled >= i64::MAX as f64 {
        return Err(Error::invalid(format!(
            "AQI {value} scaled by {factor} x {noise} does not fit in an i64"
        )));
    }
    Ok(scaled as i64)
}

fn require_positive(baseline_aqi: i64) -> Result<()> {
    // ---
    if baseline_aqi <= 0 {
        return Err(Error::invalid(format!(
            "baseline AQI must be positive, got {baseline_aqi}"
        )));
    }
    Ok(())
}

/// Generate a 24-hour profile for a baseline AQI.
///
/// Per hour, one noise draw scales the AQI, then six independent draws (in
/// [`Pollutant::ALL`] order) scale the pollutant concentrations.
pub fn generate_day(
    baseline_aqi: i64,
    source: &mut impl RandomSource,
) -> Result<Vec<HourlyReading>> {
    // ---
    require_positive(baseline_aqi)?;

    let mut readings = Vec::with_capacity(HOURS_PER_DAY as usize);
    for hour in 0..HOURS_PER_DAY {
        let noise = draw(source, HOURLY_NOISE.0, HOURLY_NOISE.1)?;
        let aqi = scale(baseline_aqi, diurnal_multiplier(hour), noise)?;

        let mut levels = [0i64; 6];
        for (slot, pollutant) in levels.iter_mut().zip(Pollutant::ALL) {
            let noise = draw(source, POLLUTANT_NOISE.0, POLLUTANT_NOISE.1)?;
            *slot = scale(aqi, pollutant.ratio(), noise)?;
        }
        let [pm25, pm10, no2, so2, co, o3] = levels;

        readings.push(HourlyReading {
            hour,
            hour_label: format!("{hour:02}:00"),
            aqi,
            pm25,
            pm10,
            no2,
            so2,
            co,
            o3,
        });
    }

    debug!(baseline_aqi, hours = readings.len(), "generated day profile");
    Ok(readings)
}

/// Generate a trailing daily series per city, ending on `end_date`.
///
/// Day `i` of a series falls on `end_date - (window_days - 1 - i)`. Cities
/// are generated in the order given, each independently.
pub fn generate_month<S: AsRef<str>>(
    cities: &[(S, i64)],
    window_days: u32,
    end_date: NaiveDate,
    source: &mut impl RandomSource,
) -> Result<BTreeMap<String, Vec<DailyAqi>>> {
    // ---
    if window_days == 0 {
        return Err(Error::invalid("window must cover at least one day"));
    }
    for (name, baseline) in cities {
        let name: &str = name.as_ref();
        require_positive(*baseline).map_err(|e| Error::invalid(format!("city '{name}': {e}")))?;
    }

    let dates = window_dates(window_days, end_date)?;

    let mut series: BTreeMap<String, Vec<DailyAqi>> = BTreeMap::new();
    for (name, baseline) in cities {
        let name: &str = name.as_ref();
        if series.contains_key(name) {
            return Err(Error::invalid(format!("city '{name}' listed twice")));
        }

        let mut days = Vec::with_capacity(dates.len());
        for date in &dates {
            let noise = draw(source, DAILY_NOISE.0, DAILY_NOISE.1)?;
            days.push(DailyAqi {
                date: *date,
                date_label: date.format("%d/%m").to_string(),
                aqi: scale(*baseline, 1.0, noise)?,
            });
        }
        series.insert(name.to_string(), days);
    }

    debug!(cities = series.len(), window_days, %end_date, "generated monthly series");
    Ok(series)
}

fn window_dates(window_days: u32, end_date: NaiveDate) -> Result<Vec<NaiveDate>> {
    // ---
    (0..window_days)
        .map(|i| {
            let back = i64::from(window_days - 1 - i);
            end_date
                .checked_sub_signed(Duration::days(back))
                .ok_or_else(|| Error::invalid(format!("date window underflows before {end_date}")))
        })
        .collect()
}

/// Generate a day for a catalog city.
pub fn generate_city_day(
    catalog: &Catalog,
    name: &str,
    source: &mut impl RandomSource,
) -> Result<Vec<HourlyReading>> {
    // ---
    let city = catalog.get(name)?;
    generate_day(city.baseline_aqi, source)
}

/// Generate monthly series for catalog cities.
pub fn generate_catalog_month<S: AsRef<str>>(
    catalog: &Catalog,
    names: &[S],
    window_days: u32,
    end_date: NaiveDate,
    source: &mut impl RandomSource,
) -> Result<BTreeMap<String, Vec<DailyAqi>>> {
    // ---
    let mut cities = Vec::with_capacity(names.len());
    for name in names {
        let city = catalog.get(name.as_ref())?;
        cities.push((city.name.as_str(), city.baseline_aqi));
    }

    generate_month(&cities, window_days, end_date, source)
}
