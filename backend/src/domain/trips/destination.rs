//! Destination value object: a named stop with a date window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::DestinationValidationError;

/// Raw destination fields before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDraft {
    pub name: String,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A validated destination. Destinations have no identity of their own.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `lat` lies in `[-90, 90]` and `lng` in `[-180, 180]` when present.
/// - `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lng: Option<f64>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl Destination {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref()
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }
}

impl TryFrom<DestinationDraft> for Destination {
    type Error = DestinationValidationError;

    fn try_from(draft: DestinationDraft) -> Result<Self, Self::Error> {
        let DestinationDraft {
            name,
            place_id,
            lat,
            lng,
            start_date,
            end_date,
        } = draft;

        let name = name.trim();
        if name.is_empty() {
            return Err(DestinationValidationError::EmptyName);
        }
        if let Some(value) = lat.filter(|value| !(-90.0..=90.0).contains(value)) {
            return Err(DestinationValidationError::LatitudeOutOfRange { value });
        }
        if let Some(value) = lng.filter(|value| !(-180.0..=180.0).contains(value)) {
            return Err(DestinationValidationError::LongitudeOutOfRange { value });
        }
        if end_date < start_date {
            return Err(DestinationValidationError::DatesOutOfOrder);
        }

        Ok(Self {
            name: name.to_owned(),
            place_id: place_id.filter(|id| !id.trim().is_empty()),
            lat,
            lng,
            start_date,
            end_date,
        })
    }
}
