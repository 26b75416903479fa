//! City catalog for the air-quality dashboard.
//!
//! The catalog is an immutable table built once at startup and handed to
//! whoever needs it. It answers name lookups, free-text search and the
//! multi-city comparison shown on the global view.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::status::{classify, AqiStatus};

// ---

/// Baseline above which a city counts as unhealthy in comparisons.
pub const UNHEALTHY_BASELINE: i64 = 100;

/// Cities shown on the global comparison view by default.
pub const DEFAULT_COMPARISON: [&str; 10] = [
    "Delhi",
    "Mumbai",
    "Beijing",
    "London",
    "New York",
    "Tokyo",
    "Sydney",
    "Paris",
    "Dubai",
    "Singapore",
];

/// Cities shown on the historical trend view by default.
pub const DEFAULT_HISTORY: [&str; 5] = ["Delhi", "Mumbai", "Bangalore", "London", "New York"];

/// (name, country, flag, baseline AQI, latitude, longitude)
const BUILTIN_CITIES: [(&str, &str, &str, i64, f64, f64); 31] = [
    ("Delhi", "India", "🇮🇳", 312, 28.6139, 77.2090),
    ("Mumbai", "India", "🇮🇳", 158, 19.0760, 72.8777),
    ("Bangalore", "India", "🇮🇳", 89, 12.9716, 77.5946),
    ("Kolkata", "India", "🇮🇳", 184, 22.5726, 88.3639),
    ("Chennai", "India", "🇮🇳", 97, 13.0827, 80.2707),
    ("Hyderabad", "India", "🇮🇳", 126, 17.3850, 78.4867),
    ("Beijing", "China", "🇨🇳", 156, 39.9042, 116.4074),
    ("Shanghai", "China", "🇨🇳", 132, 31.2304, 121.4737),
    ("Tokyo", "Japan", "🇯🇵", 45, 35.6762, 139.6503),
    ("Seoul", "South Korea", "🇰🇷", 78, 37.5665, 126.9780),
    ("Bangkok", "Thailand", "🇹🇭", 142, 13.7563, 100.5018),
    ("Singapore", "Singapore", "🇸🇬", 52, 1.3521, 103.8198),
    ("Dubai", "UAE", "🇦🇪", 95, 25.2048, 55.2708),
    ("London", "United Kingdom", "🇬🇧", 58, 51.5074, -0.1278),
    ("Paris", "France", "🇫🇷", 62, 48.8566, 2.3522),
    ("Berlin", "Germany", "🇩🇪", 48, 52.5200, 13.4050),
    ("Rome", "Italy", "🇮🇹", 71, 41.9028, 12.4964),
    ("Madrid", "Spain", "🇪🇸", 65, 40.4168, -3.7038),
    ("Amsterdam", "Netherlands", "🇳🇱", 42, 52.3676, 4.9041),
    ("Moscow", "Russia", "🇷🇺", 89, 55.7558, 37.6173),
    ("New York", "United States", "🇺🇸", 54, 40.7128, -74.0060),
    ("Los Angeles", "United States", "🇺🇸", 87, 34.0522, -118.2437),
    ("Chicago", "United States", "🇺🇸", 51, 41.8781, -87.6298),
    ("Toronto", "Canada", "🇨🇦", 38, 43.6532, -79.3832),
    ("Mexico City", "Mexico", "🇲🇽", 118, 19.4326, -99.1332),
    ("São Paulo", "Brazil", "🇧🇷", 76, -23.5505, -46.6333),
    ("Buenos Aires", "Argentina", "🇦🇷", 63, -34.6037, -58.3816),
    ("Cairo", "Egypt", "🇪🇬", 168, 30.0444, 31.2357),
    ("Lagos", "Nigeria", "🇳🇬", 145, 6.5244, 3.3792),
    ("Sydney", "Australia", "🇦🇺", 35, -33.8688, 151.2093),
    ("Melbourne", "Australia", "🇦🇺", 32, -37.8136, 144.9631),
];

/// Static reference data for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityProfile {
    // ---
    pub name: String,
    pub country: String,
    pub flag: String,
    pub baseline_aqi: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityProfile {
    // ---
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        flag: impl Into<String>,
        baseline_aqi: i64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        // ---
        Self {
            name: name.into(),
            country: country.into(),
            flag: flag.into(),
            baseline_aqi,
            latitude,
            longitude,
        }
    }

    /// Classification of the city's baseline AQI.
    pub fn baseline_status(&self) -> Result<AqiStatus> {
        classify(self.baseline_aqi)
    }

    fn matches(&self, needle: &str) -> bool {
        // ---
        self.name.to_lowercase().contains(needle) || self.country.to_lowercase().contains(needle)
    }
}

/// Immutable, ordered set of cities keyed by unique name.
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: Vec<CityProfile>,
    index: HashMap<String, usize>,
}

impl Catalog {
    // ---
    /// Build a catalog, rejecting duplicate names and non-positive baselines.
    pub fn new(cities: Vec<CityProfile>) -> Result<Self> {
        // ---
        let mut index = HashMap::with_capacity(cities.len());
        for (i, city) in cities.iter().enumerate() {
            if city.baseline_aqi <= 0 {
                return Err(Error::invalid(format!(
                    "city '{}' has non-positive baseline AQI {}",
                    city.name, city.baseline_aqi
                )));
            }
            if index.insert(city.name.clone(), i).is_some() {
                return Err(Error::invalid(format!("duplicate city '{}'", city.name)));
            }
        }
        Ok(Self { cities, index })
    }

    /// The fixed catalog of global cities the dashboard ships with.
    pub fn builtin() -> Self {
        // ---
        let cities: Vec<CityProfile> = BUILTIN_CITIES
            .iter()
            .map(|&(name, country, flag, aqi, lat, lon)| {
                CityProfile::new(name, country, flag, aqi, lat, lon)
            })
            .collect();
        let index = cities
            .iter()
            .enumerate()
            .map(|(i, city)| (city.name.clone(), i))
            .collect();
        Self { cities, index }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityProfile> {
        self.cities.iter()
    }

    /// Look up a city by exact name.
    pub fn get(&self, name: &str) -> Result<&CityProfile> {
        // ---
        self.index
            .get(name)
            .map(|&i| &self.cities[i])
            .ok_or_else(|| Error::invalid(format!("unknown city '{name}'")))
    }

    /// Case-insensitive substring search over city name and country.
    ///
    /// Results keep catalog order. A blank query returns every city.
    pub fn search(&self, query: &str) -> Vec<&CityProfile> {
        // ---
        let needle = query.trim().to_lowercase();
        self.cities
            .iter()
            .filter(|city| needle.is_empty() || city.matches(&needle))
            .collect()
    }

    /// Rank the named cities by baseline AQI and compute headline figures.
    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Result<Comparison> {
        // ---
        if names.is_empty() {
            return Err(Error::invalid("comparison needs at least one city"));
        }

        let mut ranked = Vec::with_capacity(names.len());
        for name in names {
            let city = self.get(name.as_ref())?;
            ranked.push(RankedCity {
                name: city.name.clone(),
                country: city.country.clone(),
                flag: city.flag.clone(),
                aqi: city.baseline_aqi,
                status: city.baseline_status()?,
            });
        }
        // Stable, so ties keep request order.
        ranked.sort_by(|a, b| b.aqi.cmp(&a.aqi));

        let total = ranked.len();
        let sum: i128 = ranked.iter().map(|c| i128::from(c.aqi)).sum();
        let unhealthy = ranked
            .iter()
            .filter(|c| c.aqi > UNHEALTHY_BASELINE)
            .count();

        Ok(Comparison {
            highest: ranked[0].clone(),
            lowest: ranked[total - 1].clone(),
            // Mean of i64 values always fits back into an i64.
            average: (sum / total as i128) as i64,
            unhealthy,
            total,
            ranked,
        })
    }
}

/// One row of a comparison, highest AQI first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCity {
    // ---
    pub name: String,
    pub country: String,
    pub flag: String,
    pub aqi: i64,
    pub status: AqiStatus,
}

/// Result of [`Catalog::compare`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    // ---
    pub ranked: Vec<RankedCity>,
    pub highest: RankedCity,
    pub lowest: RankedCity,
    /// Mean baseline, truncated.
    pub average: i64,
    /// Cities with baseline above [`UNHEALTHY_BASELINE`].
    pub unhealthy: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        // ---
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 31);

        // Same data must pass the validating constructor.
        let rebuilt = Catalog::new(catalog.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt.len(), 31);

        let delhi = catalog.get("Delhi").unwrap();
        assert_eq!(delhi.country, "India");
        assert_eq!(delhi.baseline_aqi, 312);
        assert_eq!(delhi.latitude, 28.6139);

        for name in DEFAULT_COMPARISON.iter().chain(DEFAULT_HISTORY.iter()) {
            assert!(catalog.get(name).is_ok(), "{} missing", name);
        }
    }

    #[test]
    fn test_unknown_city() {
        // ---
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.get("Atlantis"),
            Err(Error::InvalidInput(_))
        ));
        // Lookup is exact.
        assert!(catalog.get("delhi").is_err());
    }

    #[test]
    fn test_new_rejects_bad_profiles() {
        // ---
        let dup = vec![
            CityProfile::new("X", "A", "", 10, 0.0, 0.0),
            CityProfile::new("X", "B", "", 20, 0.0, 0.0),
        ];
        assert!(Catalog::new(dup).is_err());

        let zero = vec![CityProfile::new("Y", "A", "", 0, 0.0, 0.0)];
        assert!(Catalog::new(zero).is_err());
    }

    #[test]
    fn test_search_by_name_and_country() {
        // ---
        let catalog = Catalog::builtin();

        let names: Vec<&str> = catalog
            .search("india")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Delhi", "Mumbai", "Bangalore", "Kolkata", "Chennai", "Hyderabad"]
        );

        let lon: Vec<&str> = catalog
            .search("  LON ")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(lon, vec!["London"]);

        let states = catalog.search("united states");
        assert_eq!(states.len(), 3);

        assert!(catalog.search("zzz").is_empty());
        assert_eq!(catalog.search("").len(), 31);
    }

    #[test]
    fn test_default_comparison() {
        // ---
        let catalog = Catalog::builtin();
        let cmp = catalog.compare(&DEFAULT_COMPARISON).unwrap();

        assert_eq!(cmp.total, 10);
        assert_eq!(cmp.highest.name, "Delhi");
        assert_eq!(cmp.lowest.name, "Sydney");
        // 312+158+156+58+54+45+35+62+95+52 = 1027
        assert_eq!(cmp.average, 102);
        assert_eq!(cmp.unhealthy, 3);
        assert!(cmp.ranked.windows(2).all(|w| w[0].aqi >= w[1].aqi));
        assert_eq!(cmp.highest.status.label.label(), "Hazardous");
    }

    #[test]
    fn test_compare_huge_baselines() {
        // ---
        let catalog = Catalog::new(vec![
            CityProfile::new("A", "X", "", i64::MAX, 0.0, 0.0),
            CityProfile::new("B", "X", "", i64::MAX, 0.0, 0.0),
            CityProfile::new("C", "X", "", i64::MAX - 4, 0.0, 0.0),
        ])
        .unwrap();

        let cmp = catalog.compare(&["A", "B", "C"]).unwrap();
        assert_eq!(cmp.average, i64::MAX - 2);
        assert_eq!(cmp.unhealthy, 3);
        assert_eq!(cmp.highest.name, "A");
        assert_eq!(cmp.lowest.name, "C");
    }

    #[test]
    fn test_compare_rejects_bad_input() {
        // ---
        let catalog = Catalog::builtin();
        let none: [&str; 0] = [];
        assert!(catalog.compare(&none).is_err());
        assert!(catalog.compare(&["Delhi", "Atlantis"]).is_err());
    }
}
