//! Wayfarer Itinerary Store
//!
//! Holds the signed-in user's itineraries in memory and keeps them in step
//! with a `PersistenceGateway`.
//!
//! # Architecture
//!
//! - State is published through a `tokio::sync::watch` channel; every change
//!   is visible to subscribers as a [`StoreSnapshot`]
//! - Identity changes arrive from an [`IdentityProvider`] and replace the
//!   collection wholesale
//! - Mutations are serialized; favorite toggles are applied optimistically
//!   and rolled back on failure
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use wayfarer_domain::{ItineraryDraft, UserId};
//! use wayfarer_gateway::MemoryGateway;
//! use wayfarer_store::{IdentityProvider, ItineraryStore};
//!
//! # tokio_test::block_on(async {
//! let identity = IdentityProvider::new();
//! let store = Arc::new(ItineraryStore::new(Arc::new(MemoryGateway::new())));
//!
//! identity.sign_in(UserId::new("alice"));
//! store.load(identity.current()).await.unwrap();
//!
//! let draft = ItineraryDraft {
//!     title: "Summer in the Alps".into(),
//!     destination: "Interlaken, Switzerland".into(),
//!     start_date: "2024-07-01".into(),
//!     end_date: "2024-07-10".into(),
//!     categories: vec!["Adventure".into()],
//!     description: "Hiking and lakes for ten days".into(),
//!     photo_url: "https://example.com/alps.jpg".into(),
//!     activities: None,
//! };
//! let created = store.create(&draft).await.unwrap();
//! assert_eq!(created.photo_hint, "interlaken");
//! assert_eq!(store.snapshot().itineraries.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod identity;
mod snapshot;
mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use identity::{Identity, IdentityProvider};
pub use snapshot::{StorePhase, StoreSnapshot};
pub use store::ItineraryStore;
