//! Hotspot data and health guidance.
//!
//! Six Indian cities carry per-neighbourhood hotspot readings. For those the
//! dashboard shows the worst hotspot, a mask recommendation and a health
//! advisory keyed off the worst AQI, plus the top hotspots.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::status::{classify, AqiStatus};

// ---

/// Number of hotspots listed in a report's top list.
pub const TOP_HOTSPOTS: usize = 3;

/// A monitored neighbourhood within a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hotspot {
    // ---
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub aqi: i64,
    pub zone: &'static str,
}

const fn hotspot(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    aqi: i64,
    zone: &'static str,
) -> Hotspot {
    Hotspot {
        name,
        latitude,
        longitude,
        aqi,
        zone,
    }
}

const DELHI: &[Hotspot] = &[
    hotspot("Anand Vihar", 28.6469, 77.3162, 425, "Traffic Hub"),
    hotspot("Mundka", 28.6832, 77.0357, 398, "Industrial"),
    hotspot("Dwarka", 28.5921, 77.0460, 365, "Residential"),
    hotspot("Rohini", 28.7495, 77.0687, 352, "Residential"),
    hotspot("Punjabi Bagh", 28.6692, 77.1317, 340, "Commercial"),
    hotspot("Connaught Place", 28.6315, 77.2167, 285, "Commercial"),
    hotspot("ITO", 28.6280, 77.2506, 310, "Traffic Hub"),
    hotspot("RK Puram", 28.5629, 77.1824, 295, "Residential"),
    hotspot("Nehru Place", 28.5494, 77.2501, 318, "Commercial"),
    hotspot("Lodi Road", 28.5926, 77.2197, 245, "Green Zone"),
];

const MUMBAI: &[Hotspot] = &[
    hotspot("Worli", 19.0144, 72.8186, 185, "Industrial"),
    hotspot("Bandra", 19.0596, 72.8295, 165, "Commercial"),
    hotspot("Andheri", 19.1136, 72.8697, 175, "Residential"),
    hotspot("Borivali", 19.2304, 72.8570, 148, "Residential"),
    hotspot("Colaba", 18.9067, 72.8147, 142, "Coastal"),
    hotspot("Chembur", 19.0633, 72.8990, 170, "Industrial"),
];

const BANGALORE: &[Hotspot] = &[
    hotspot("Silk Board", 12.9180, 77.6229, 105, "Traffic Hub"),
    hotspot("Whitefield", 12.9698, 77.7500, 92, "IT Hub"),
    hotspot("Marathahalli", 12.9591, 77.6974, 98, "Commercial"),
    hotspot("BTM Layout", 12.9165, 77.6101, 88, "Residential"),
    hotspot("Indiranagar", 12.9784, 77.6408, 82, "Residential"),
];

const KOLKATA: &[Hotspot] = &[
    hotspot("Howrah", 22.5958, 88.2636, 215, "Industrial"),
    hotspot("Ballygunge", 22.5354, 88.3643, 192, "Residential"),
    hotspot("Salt Lake", 22.5809, 88.4195, 178, "Commercial"),
    hotspot("Park Street", 22.5535, 88.3524, 188, "Commercial"),
    hotspot("Jadavpur", 22.4985, 88.3673, 172, "Residential"),
];

const CHENNAI: &[Hotspot] = &[
    hotspot("T Nagar", 13.0418, 80.2341, 108, "Commercial"),
    hotspot("Anna Nagar", 13.0850, 80.2101, 98, "Residential"),
    hotspot("Velachery", 12.9750, 80.2210, 92, "Residential"),
    hotspot("Guindy", 13.0067, 80.2206, 102, "Industrial"),
    hotspot("Marina Beach", 13.0499, 80.2824, 78, "Coastal"),
];

const HYDERABAD: &[Hotspot] = &[
    hotspot("Charminar", 17.3616, 78.4747, 145, "Commercial"),
    hotspot("Hitec City", 17.4435, 78.3772, 128, "IT Hub"),
    hotspot("Kukatpally", 17.4944, 78.3975, 135, "Residential"),
    hotspot("Secunderabad", 17.4399, 78.4983, 132, "Commercial"),
    hotspot("Gachibowli", 17.4399, 78.3489, 118, "IT Hub"),
];

/// Hotspots recorded for `city`; empty for cities without neighbourhood data.
pub fn hotspots(city: &str) -> &'static [Hotspot] {
    // ---
    match city {
        "Delhi" => DELHI,
        "Mumbai" => MUMBAI,
        "Bangalore" => BANGALORE,
        "Kolkata" => KOLKATA,
        "Chennai" => CHENNAI,
        "Hyderabad" => HYDERABAD,
        _ => &[],
    }
}

/// Urgency attached to a mask recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    NotNeeded,
    Optional,
    Recommended,
    Mandatory,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskRecommendation {
    // ---
    pub urgency: Urgency,
    pub mask: &'static str,
    pub description: &'static str,
}

impl MaskRecommendation {
    // ---
    pub fn for_aqi(aqi: i64) -> Self {
        // ---
        let (urgency, mask, description) = if aqi > 300 {
            (
                Urgency::Critical,
                "N99/P100 Respirator",
                "Heavy-duty respirator with 99%+ filtration",
            )
        } else if aqi > 200 {
            (
                Urgency::Mandatory,
                "N95/KN95 Mask",
                "Medical-grade mask with 95% filtration",
            )
        } else if aqi > 100 {
            (
                Urgency::Recommended,
                "N95 or Surgical Mask",
                "Standard medical mask recommended",
            )
        } else if aqi > 50 {
            (
                Urgency::Optional,
                "Surgical Mask",
                "Basic protection for sensitive groups",
            )
        } else {
            (Urgency::NotNeeded, "No Mask Required", "Air quality is good")
        };

        Self {
            urgency,
            mask,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthAdvisory {
    // ---
    pub headline: &'static str,
    pub precautions: &'static [&'static str],
}

impl HealthAdvisory {
    // ---
    pub fn for_aqi(aqi: i64) -> Self {
        // ---
        let (headline, precautions): (&'static str, &'static [&'static str]) = if aqi > 300 {
            (
                "Emergency Alert!",
                &[
                    "Avoid all outdoor activities",
                    "Keep windows/doors closed",
                    "Use air purifiers indoors",
                    "Seek medical help if breathing issues occur",
                ],
            )
        } else if aqi > 200 {
            (
                "High Alert!",
                &[
                    "Limit outdoor exposure",
                    "Wear N95 masks outdoors",
                    "Children/elderly stay indoors",
                    "Avoid heavy exercise",
                ],
            )
        } else if aqi > 100 {
            (
                "Moderate Alert",
                &[
                    "Sensitive groups use masks",
                    "Reduce prolonged outdoor activities",
                    "Monitor symptoms",
                ],
            )
        } else {
            (
                "Air Quality Acceptable",
                &[
                    "Normal outdoor activities OK",
                    "No special precautions needed",
                ],
            )
        };

        Self {
            headline,
            precautions,
        }
    }
}

/// Hotspot view for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotReport {
    // ---
    pub city: String,
    pub center: (f64, f64),
    pub hotspots: &'static [Hotspot],
    pub worst: Hotspot,
    pub worst_status: AqiStatus,
    pub mask: MaskRecommendation,
    pub advisory: HealthAdvisory,
    /// Highest AQI first; ties keep table order.
    pub top: Vec<Hotspot>,
}

impl HotspotReport {
    // ---
    /// Build the report for a catalog city.
    ///
    /// Returns `Ok(None)` for a known city without hotspot data and
    /// `InvalidInput` for an unknown city.
    pub fn for_city(catalog: &Catalog, name: &str) -> Result<Option<Self>> {
        // ---
        let city = catalog.get(name)?;
        let spots = hotspots(&city.name);
        if spots.is_empty() {
            return Ok(None);
        }

        let mut ranked = spots.to_vec();
        ranked.sort_by(|a, b| b.aqi.cmp(&a.aqi));
        let worst = ranked[0];
        ranked.truncate(TOP_HOTSPOTS);

        Ok(Some(Self {
            city: city.name.clone(),
            center: (city.latitude, city.longitude),
            hotspots: spots,
            worst,
            worst_status: classify(worst.aqi)?,
            mask: MaskRecommendation::for_aqi(worst.aqi),
            advisory: HealthAdvisory::for_aqi(worst.aqi),
            top: ranked,
        }))
    }
}
