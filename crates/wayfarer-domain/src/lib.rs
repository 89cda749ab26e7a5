//! Wayfarer Domain Layer
//!
//! This crate contains the data model and pure business logic for Wayfarer,
//! a personal travel-itinerary manager. It defines the fundamental records,
//! the rules for building and filtering them, and the trait interfaces that
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Itinerary**: A trip record owned by exactly one user
//! - **Draft**: User-supplied data that the Record Factory turns into an itinerary
//! - **Patch**: The partial field update the store sends for in-place edits
//! - **Filter**: A favorites/search view over an ordered collection
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for every external interaction (persistence, suggestions)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod factory;
pub mod filter;
pub mod itinerary;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use error::{GatewayError, ValidationError, Violation};
pub use factory::{derive_photo_hint, RecordFactory};
pub use filter::{filter, ItineraryFilter};
pub use itinerary::{
    Activity, GeoPoint, ItineraryDraft, ItineraryId, ItineraryPatch, ItineraryRecord, UserId,
};
