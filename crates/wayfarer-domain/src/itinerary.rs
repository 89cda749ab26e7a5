//! Itinerary module - the records a user authors and the identities that own them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for an itinerary
///
/// Backends may assign their own identifiers; locally generated ones are
/// UUIDv7 strings so they sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItineraryId(String);

impl ItineraryId {
    /// Generate a new UUIDv7-based identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer_domain::ItineraryId;
    ///
    /// let id = ItineraryId::generate();
    /// assert_eq!(id.as_str().len(), 36);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an identifier handed out by a backend
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItineraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItineraryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Stable identifier of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    /// Whether both coordinates fall inside their valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One planned activity on a given day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Day of the trip, starting at 1
    pub day: u32,
    /// What the activity is
    pub name: String,
    /// Where it takes place
    pub location: GeoPoint,
}

/// A stored itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRecord {
    /// Unique within the owner's collection
    pub id: ItineraryId,

    /// Identity the record belongs to
    pub owner: UserId,

    /// Trip title
    pub title: String,

    /// Free-form destination, e.g. "Interlaken, Switzerland"
    pub destination: String,

    /// ISO date (`YYYY-MM-DD`) the trip starts
    pub start_date: String,

    /// ISO date (`YYYY-MM-DD`) the trip ends
    pub end_date: String,

    /// Ordered, de-duplicated tags; never empty after creation
    pub categories: Vec<String>,

    /// Longer description of the trip
    pub description: String,

    /// Cover photo location
    pub photo_url: String,

    /// Derived from `destination` at creation time, never edited
    pub photo_hint: String,

    /// Day-by-day plan
    #[serde(default)]
    pub activities: Vec<Activity>,

    /// Whether the owner marked this trip as a favorite
    #[serde(default)]
    pub is_favorite: bool,
}

impl ItineraryRecord {
    /// Comma-joined activity names, the form the suggestion prompt expects
    pub fn activities_summary(&self) -> String {
        self.activities
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &ItineraryPatch) {
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
    }
}

/// User-supplied data for a new itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDraft {
    /// Trip title
    pub title: String,
    /// Free-form destination
    pub destination: String,
    /// ISO start date
    pub start_date: String,
    /// ISO end date
    pub end_date: String,
    /// Tags chosen by the user
    pub categories: Vec<String>,
    /// Longer description
    pub description: String,
    /// Cover photo location
    #[serde(alias = "photo")]
    pub photo_url: String,
    /// Optional day-by-day plan
    #[serde(default)]
    pub activities: Option<Vec<Activity>>,
}

/// Partial field update sent to the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPatch {
    /// New favorite flag, if changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl ItineraryPatch {
    /// Patch that sets the favorite flag
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.is_favorite.is_none()
    }
}
