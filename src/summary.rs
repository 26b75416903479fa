//! Aggregates derived from generated series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::generator::{DailyAqi, HourlyReading};
use crate::status::{classify, AqiCategory};

// ---

/// A single hour picked out of a day (peak or low).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourPoint {
    pub hour_label: String,
    pub aqi: i64,
}

/// Headline figures for a generated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    // ---
    pub mean_aqi: f64,
    /// Highest hour; the earliest wins on ties.
    pub peak: HourPoint,
    /// Lowest hour; the earliest wins on ties.
    pub low: HourPoint,
    /// Number of hours falling in each category.
    pub distribution: BTreeMap<AqiCategory, usize>,
}

impl DaySummary {
    // ---
    pub fn from_readings(readings: &[HourlyReading]) -> Result<Self> {
        // ---
        let first = readings
            .first()
            .ok_or_else(|| Error::invalid("cannot summarize an empty day"))?;

        let mut peak = first;
        let mut low = first;
        let mut total = 0i128;
        let mut distribution = BTreeMap::new();

        for reading in readings {
            if reading.aqi > peak.aqi {
                peak = reading;
            }
            if reading.aqi < low.aqi {
                low = reading;
            }
            total += i128::from(reading.aqi);
            *distribution
                .entry(classify(reading.aqi)?.label)
                .or_insert(0) += 1;
        }

        Ok(Self {
            mean_aqi: total as f64 / readings.len() as f64,
            peak: HourPoint {
                hour_label: peak.hour_label.clone(),
                aqi: peak.aqi,
            },
            low: HourPoint {
                hour_label: low.hour_label.clone(),
                aqi: low.aqi,
            },
            distribution,
        })
    }
}

/// A single day of one city's series (extreme point of a month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityPoint {
    pub city: String,
    pub date_label: String,
    pub aqi: i64,
}

/// Headline figures across several cities' monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    // ---
    pub highest: CityPoint,
    pub lowest: CityPoint,
    pub mean_aqi: f64,
}

impl MonthSummary {
    // ---
    /// Summarize per-city series.
    ///
    /// Cities are scanned in `order` (the order the caller listed them in)
    /// and days oldest first; the first extreme encountered wins. A name in
    /// `order` without a series is rejected.
    pub fn from_series<S: AsRef<str>>(
        series: &BTreeMap<String, Vec<DailyAqi>>,
        order: &[S],
    ) -> Result<Self> {
        // ---
        let mut ordered = Vec::with_capacity(order.len());
        for name in order {
            let name: &str = name.as_ref();
            let (city, days) = series
                .get_key_value(name)
                .ok_or_else(|| Error::invalid(format!("no series for city '{name}'")))?;
            ordered.push((city, days));
        }

        let mut points = ordered
            .into_iter()
            .flat_map(|(city, days)| days.iter().map(move |day| (city, day)));

        let (city, day) = points
            .next()
            .ok_or_else(|| Error::invalid("cannot summarize an empty history"))?;

        let mut highest = (city, day);
        let mut lowest = (city, day);
        let mut total = i128::from(day.aqi);
        let mut count = 1usize;

        for (city, day) in points {
            if day.aqi > highest.1.aqi {
                highest = (city, day);
            }
            if day.aqi < lowest.1.aqi {
                lowest = (city, day);
            }
            total += i128::from(day.aqi);
            count += 1;
        }

        let point = |(city, day): (&String, &DailyAqi)| CityPoint {
            city: city.clone(),
            date_label: day.date_label.clone(),
            aqi: day.aqi,
        };

        Ok(Self {
            highest: point(highest),
            lowest: point(lowest),
            mean_aqi: total as f64 / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::generator::{generate_day, generate_month};
    use crate::random::MidpointSource;
    use chrono::NaiveDate;

    #[test]
    fn test_midpoint_day_summary() {
        // ---
        let day = generate_day(100, &mut MidpointSource).unwrap();
        let summary = DaySummary::from_readings(&day).unwrap();

        // 7 x 70 + 5 x 100 + 4 x 130 + 4 x 85 + 4 x 114 = 2306
        assert!((summary.mean_aqi - 2306.0 / 24.0).abs() < 1e-9);
        assert_eq!(summary.peak.hour_label, "07:00");
        assert_eq!(summary.peak.aqi, 130);
        assert_eq!(summary.low.hour_label, "00:00");
        assert_eq!(summary.low.aqi, 70);
        assert_eq!(summary.distribution[&AqiCategory::Moderate], 16);
        assert_eq!(summary.distribution[&AqiCategory::Unhealthy], 8);
        assert!(!summary.distribution.contains_key(&AqiCategory::Good));
    }

    #[test]
    fn test_empty_day_rejected() {
        // ---
        assert!(DaySummary::from_readings(&[]).is_err());
    }

    #[test]
    fn test_month_summary() {
        // ---
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let series =
            generate_month(&[("A", 80), ("B", 200)], 30, end, &mut MidpointSource).unwrap();
        let summary = MonthSummary::from_series(&series, &["A", "B"]).unwrap();

        assert_eq!(summary.highest.city, "B");
        assert_eq!(summary.highest.aqi, 200);
        assert_eq!(summary.highest.date_label, "02/01");
        assert_eq!(summary.lowest.city, "A");
        assert_eq!(summary.lowest.aqi, 80);
        assert!((summary.mean_aqi - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_month_rejected() {
        // ---
        let none: [&str; 0] = [];
        assert!(MonthSummary::from_series(&BTreeMap::new(), &none).is_err());
        assert!(MonthSummary::from_series(&BTreeMap::new(), &["X"]).is_err());
    }

    #[test]
    fn test_month_ties_follow_request_order() {
        // ---
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let series =
            generate_month(&[("Zurich", 90), ("Accra", 90)], 5, end, &mut MidpointSource)
                .unwrap();

        let summary = MonthSummary::from_series(&series, &["Zurich", "Accra"]).unwrap();
        assert_eq!(summary.highest.city, "Zurich");
        assert_eq!(summary.lowest.city, "Zurich");

        let summary = MonthSummary::from_series(&series, &["Accra", "Zurich"]).unwrap();
        assert_eq!(summary.highest.city, "Accra");
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        // ---
        let day = generate_day(i64::MAX / 4, &mut MidpointSource).unwrap();
        let summary = DaySummary::from_readings(&day).unwrap();
        assert!(summary.mean_aqi > (i64::MAX / 4) as f64 * 0.5);
        assert_eq!(summary.distribution[&AqiCategory::Hazardous], 24);

        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let big = i64::MAX / 2;
        let series =
            generate_month(&[("A", big), ("B", big)], 30, end, &mut MidpointSource).unwrap();
        let summary = MonthSummary::from_series(&series, &["A", "B"]).unwrap();
        assert_eq!(summary.highest.aqi, summary.lowest.aqi);
        assert!(summary.mean_aqi > 0.0);
    }
}
