//! Published store state

use std::fmt;
use std::sync::Arc;
use wayfarer_domain::{filter, ItineraryFilter, ItineraryId, ItineraryRecord, UserId};

/// Where the store is in its per-identity lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePhase {
    /// Identity not known yet; nothing loaded
    Unresolved,
    /// Nobody signed in; collection empty
    NoIdentity,
    /// Fetch for `user` in flight; collection empty
    Loading {
        /// Identity being loaded
        user: UserId,
    },
    /// Collection for `user` is loaded
    Ready {
        /// Identity the collection belongs to
        user: UserId,
    },
    /// The latest fetch for `user` failed; collection empty
    Failed {
        /// Identity whose load failed
        user: UserId,
        /// Gateway error message
        reason: String,
    },
}

impl StorePhase {
    /// Whether presentation should show a loading state
    pub fn is_loading(&self) -> bool {
        matches!(self, StorePhase::Unresolved | StorePhase::Loading { .. })
    }

    /// Identity the phase is about, if any
    pub fn user(&self) -> Option<&UserId> {
        match self {
            StorePhase::Loading { user }
            | StorePhase::Ready { user }
            | StorePhase::Failed { user, .. } => Some(user),
            StorePhase::Unresolved | StorePhase::NoIdentity => None,
        }
    }
}

impl fmt::Display for StorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorePhase::Unresolved => write!(f, "unresolved"),
            StorePhase::NoIdentity => write!(f, "signed out"),
            StorePhase::Loading { user } => write!(f, "loading ({})", user),
            StorePhase::Ready { user } => write!(f, "ready ({})", user),
            StorePhase::Failed { user, reason } => write!(f, "failed ({}): {}", user, reason),
        }
    }
}

/// Read-only view of the store handed to subscribers
///
/// Cloning is cheap: the collection is shared.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Lifecycle phase
    pub phase: StorePhase,

    /// Collection for the phase's identity, newest first
    pub itineraries: Arc<Vec<ItineraryRecord>>,

    /// Mutations currently in flight (the "mutating" sub-state of ready)
    pub pending_mutations: usize,

    /// Load generation the collection belongs to
    pub generation: u64,
}

impl StoreSnapshot {
    pub(crate) fn initial() -> Self {
        Self {
            phase: StorePhase::Unresolved,
            itineraries: Arc::new(Vec::new()),
            pending_mutations: 0,
            generation: 0,
        }
    }

    /// Whether presentation should show a loading state
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Whether a mutation is in flight
    pub fn is_mutating(&self) -> bool {
        self.pending_mutations > 0
    }

    /// Look up a record by id
    pub fn get(&self, id: &ItineraryId) -> Option<&ItineraryRecord> {
        self.itineraries.iter().find(|r| &r.id == id)
    }

    /// Filtered view of the collection
    pub fn view<'a>(
        &'a self,
        criteria: &ItineraryFilter,
    ) -> impl Iterator<Item = &'a ItineraryRecord> + Clone + 'a {
        filter(&self.itineraries, criteria)
    }
}
