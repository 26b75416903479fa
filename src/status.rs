//! AQI classification.
//!
//! Maps an AQI integer onto one of five fixed categories using an ordered
//! threshold table. Rows are evaluated in ascending order and the first row
//! whose inclusive upper bound covers the value wins; the final row is
//! unbounded.

use serde::Serialize;

use crate::error::{Error, Result};

// ---

/// The five AQI categories, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    // ---
    pub fn label(&self) -> &'static str {
        // ---
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Ordinal position, 1 (Good) through 5 (Hazardous).
    pub fn severity_rank(&self) -> u8 {
        *self as u8 + 1
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the threshold table.
#[derive(Debug, Clone, Copy)]
pub struct StatusBand {
    // ---
    /// Inclusive upper bound; `None` for the open-ended top band.
    pub upper: Option<i64>,
    pub category: AqiCategory,
    pub description: &'static str,
    pub color: &'static str,
}

/// Threshold table, ascending. Changing a threshold only touches this table.
pub static STATUS_TABLE: [StatusBand; 5] = [
    StatusBand {
        upper: Some(50),
        category: AqiCategory::Good,
        description: "Air quality is satisfactory",
        color: "#10b981",
    },
    StatusBand {
        upper: Some(100),
        category: AqiCategory::Moderate,
        description: "Acceptable for most people",
        color: "#fbbf24",
    },
    StatusBand {
        upper: Some(200),
        category: AqiCategory::Unhealthy,
        description: "Sensitive groups affected",
        color: "#f97316",
    },
    StatusBand {
        upper: Some(300),
        category: AqiCategory::VeryUnhealthy,
        description: "Health alert for everyone",
        color: "#ef4444",
    },
    StatusBand {
        upper: None,
        category: AqiCategory::Hazardous,
        description: "Emergency conditions",
        color: "#991b1b",
    },
];

/// Classification result for a single AQI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiStatus {
    // ---
    pub label: AqiCategory,
    pub severity_rank: u8,
    pub description: &'static str,
    pub color: &'static str,
}

/// Classify an AQI value.
///
/// Any non-negative value classifies; negative input is rejected with
/// [`Error::InvalidInput`].
pub fn classify(aqi: i64) -> Result<AqiStatus> {
    // ---
    if aqi < 0 {
        return Err(Error::invalid(format!("AQI must be non-negative, got {aqi}")));
    }

    let band = STATUS_TABLE
        .iter()
        .find(|band| band.upper.map_or(true, |upper| aqi <= upper))
        .unwrap_or(&STATUS_TABLE[STATUS_TABLE.len() - 1]);

    Ok(AqiStatus {
        label: band.category,
        severity_rank: band.category.severity_rank(),
        description: band.description,
        color: band.color,
    })
}
