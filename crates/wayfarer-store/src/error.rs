//! Error types for store operations

use thiserror::Error;
use wayfarer_domain::{GatewayError, ItineraryId, ValidationError};

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Mutation attempted without a signed-in identity
    #[error("Not signed in")]
    NotAuthenticated,

    /// Mutation attempted while the collection is loading or failed to load
    #[error("Itineraries are not loaded yet")]
    NotReady,

    /// The addressed itinerary is not in the current collection
    #[error("Itinerary not found: {0}")]
    NotFound(ItineraryId),

    /// The draft failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence gateway failed
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl StoreError {
    /// Whether the error was raised locally without contacting the gateway
    pub fn is_local(&self) -> bool {
        !matches!(self, StoreError::Gateway(_))
    }
}
