//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::error::GatewayError;
use crate::itinerary::{ItineraryId, ItineraryPatch, ItineraryRecord, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-user keyed record storage
///
/// Implemented by the infrastructure layer (wayfarer-gateway). Every call is
/// scoped to one owner; an implementation must never return or touch
/// another owner's records.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist a new record and return the identifier the backend assigned
    /// (or confirmed)
    async fn add(&self, owner: &UserId, record: &ItineraryRecord)
        -> Result<ItineraryId, GatewayError>;

    /// All records owned by `owner`, newest first
    async fn list_all(&self, owner: &UserId) -> Result<Vec<ItineraryRecord>, GatewayError>;

    /// Apply a partial update to one record
    async fn update(
        &self,
        owner: &UserId,
        id: &ItineraryId,
        patch: &ItineraryPatch,
    ) -> Result<(), GatewayError>;

    /// Remove one record
    async fn delete(&self, owner: &UserId, id: &ItineraryId) -> Result<(), GatewayError>;
}

/// Input for an itinerary suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Where the trip goes
    pub location: String,

    /// Activities already planned, comma separated
    pub activities: String,
}

impl SuggestionRequest {
    /// Build the request for an existing itinerary
    pub fn for_itinerary(record: &ItineraryRecord) -> Self {
        Self {
            location: record.destination.clone(),
            activities: record.activities_summary(),
        }
    }
}

/// Raw suggestion text returned by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    /// Free-form suggestion text, formatted by presentation
    pub suggestions: String,
}

/// Trait for AI suggestion providers
///
/// Implemented by the infrastructure layer (wayfarer-llm)
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Error type for suggestion operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Suggest additional places of interest for a trip
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestions, Self::Error>;
}
