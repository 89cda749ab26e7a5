//! The itinerary store
//!
//! Owns the current identity's collection and mediates every change to it.
//!
//! # Consistency rules
//!
//! - Every load bumps a generation counter. A fetch only commits if its
//!   generation is still current when it returns; otherwise the result is
//!   dropped (a stale load).
//! - Mutations run one at a time behind an async mutex that is held from the
//!   first local change until the gateway answers, so two mutations of the
//!   same record apply in call order.
//! - A load waits for the in-flight mutation (if any) before fetching, so a
//!   fetch never races a write.
//! - A mutation whose identity session was replaced while its gateway call
//!   was in flight leaves memory alone; the newer load owns the collection.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::snapshot::{StorePhase, StoreSnapshot};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use wayfarer_domain::traits::PersistenceGateway;
use wayfarer_domain::{
    GatewayError, ItineraryDraft, ItineraryFilter, ItineraryId, ItineraryPatch, ItineraryRecord,
    RecordFactory, UserId,
};

/// A fetch that still has to run
struct LoadTicket {
    user: UserId,
    generation: u64,
}

/// Single source of truth for the current identity's itineraries
///
/// Construct once, wrap in an `Arc`, and hand clones to consumers. Readers
/// use [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe);
/// writers go through [`create`](Self::create), [`delete`](Self::delete) and
/// [`toggle_favorite`](Self::toggle_favorite).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wayfarer_domain::UserId;
/// use wayfarer_gateway::MemoryGateway;
/// use wayfarer_store::{Identity, ItineraryStore, StorePhase};
///
/// # tokio_test::block_on(async {
/// let store = ItineraryStore::new(Arc::new(MemoryGateway::new()));
/// store.load(Identity::SignedIn(UserId::new("alice"))).await.unwrap();
/// assert_eq!(store.snapshot().phase, StorePhase::Ready { user: UserId::new("alice") });
/// # });
/// ```
pub struct ItineraryStore {
    gateway: Arc<dyn PersistenceGateway>,
    config: StoreConfig,
    state: watch::Sender<StoreSnapshot>,
    mutations: Mutex<()>,
}

impl ItineraryStore {
    /// Create a store with default configuration
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_config(gateway, StoreConfig::default())
    }

    /// Create a store with the given configuration
    pub fn with_config(gateway: Arc<dyn PersistenceGateway>, config: StoreConfig) -> Self {
        let (state, _rx) = watch::channel(StoreSnapshot::initial());
        Self {
            gateway,
            config,
            state,
            mutations: Mutex::new(()),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Wait until the store is no longer loading and return that state
    pub async fn settled(&self) -> StoreSnapshot {
        let mut rx = self.subscribe();
        let snapshot = match rx.wait_for(|s| !s.is_loading()).await {
            Ok(snapshot) => snapshot.clone(),
            // The sender lives in `self`, so the channel cannot close here
            Err(_) => self.snapshot(),
        };
        snapshot
    }

    /// Look up a record in the current collection
    pub fn get(&self, id: &ItineraryId) -> Option<ItineraryRecord> {
        self.state.borrow().get(id).cloned()
    }

    /// Filtered copy of the current collection
    pub fn view(&self, criteria: &ItineraryFilter) -> Vec<ItineraryRecord> {
        self.state.borrow().view(criteria).cloned().collect()
    }

    /// Reload for `identity`, replacing the collection wholesale
    ///
    /// Resolving and signed-out identities are applied synchronously without
    /// contacting the gateway. If another load starts before this one's
    /// fetch returns, this result is discarded and `Ok(())` is returned.
    pub async fn load(&self, identity: Identity) -> Result<(), StoreError> {
        match self.begin_load(identity) {
            Some(ticket) => self.complete_load(ticket).await,
            None => Ok(()),
        }
    }

    /// Drive loads from an identity channel until its sender is dropped
    ///
    /// Each change is stamped with its generation in arrival order, then
    /// fetched on its own task so a newer identity never waits behind a
    /// superseded fetch.
    pub fn follow(self: &Arc<Self>, mut identities: watch::Receiver<Identity>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let identity = identities.borrow_and_update().clone();
                if let Some(ticket) = store.begin_load(identity) {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        if let Err(e) = store.complete_load(ticket).await {
                            tracing::warn!(error = %e, "itinerary load failed");
                        }
                    });
                }
                if identities.changed().await.is_err() {
                    tracing::debug!("identity provider dropped, no longer following");
                    break;
                }
            }
        })
    }

    /// Create an itinerary from `draft` and put it at the head of the collection
    ///
    /// Returns the stored record, carrying the id the gateway assigned.
    pub async fn create(&self, draft: &ItineraryDraft) -> Result<ItineraryRecord, StoreError> {
        let _serial = self.mutations.lock().await;
        let (user, generation) = self.require_ready()?;
        draft.validate()?;

        let mut record = RecordFactory::build(draft, &user);
        let _pending = PendingMutation::start(&self.state);

        let id = self.call(self.gateway.add(&user, &record)).await?;
        record.id = id;

        let applied = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            Arc::make_mut(&mut s.itineraries).insert(0, record.clone());
            true
        });

        if applied {
            tracing::info!(user = %user, id = %record.id, "created itinerary");
        } else {
            tracing::debug!(id = %record.id, "identity changed during create, not applying locally");
        }
        Ok(record)
    }

    /// Delete an itinerary from the gateway, then from memory
    pub async fn delete(&self, id: &ItineraryId) -> Result<(), StoreError> {
        let _serial = self.mutations.lock().await;
        let (user, generation) = self.require_ready()?;
        if self.state.borrow().get(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }

        let _pending = PendingMutation::start(&self.state);
        self.call(self.gateway.delete(&user, id)).await?;

        let removed = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            let before = s.itineraries.len();
            Arc::make_mut(&mut s.itineraries).retain(|r| &r.id != id);
            s.itineraries.len() != before
        });

        if removed {
            tracing::info!(user = %user, id = %id, "deleted itinerary");
        } else {
            tracing::debug!(user = %user, id = %id, "identity changed during delete, not applying locally");
        }
        Ok(())
    }

    /// Flip the favorite flag, optimistically
    ///
    /// The flip is visible to subscribers before the gateway answers. If the
    /// gateway fails (or the configured deadline passes) the flag is restored
    /// to its previous value before the error is returned. Returns the new
    /// flag value on success.
    pub async fn toggle_favorite(&self, id: &ItineraryId) -> Result<bool, StoreError> {
        let _serial = self.mutations.lock().await;
        let (user, generation) = self.require_ready()?;
        let previous = self
            .state
            .borrow()
            .get(id)
            .map(|r| r.is_favorite)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let next = !previous;

        let _pending = PendingMutation::start(&self.state);
        self.set_favorite(generation, id, next);

        match self
            .call(self.gateway.update(&user, id, &ItineraryPatch::favorite(next)))
            .await
        {
            Ok(()) => {
                tracing::info!(user = %user, id = %id, is_favorite = next, "updated favorite");
                Ok(next)
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "favorite update failed, rolling back");
                self.set_favorite(generation, id, previous);
                Err(e.into())
            }
        }
    }

    /// Stamp a new generation and move to the phase `identity` calls for
    fn begin_load(&self, identity: Identity) -> Option<LoadTicket> {
        let (phase, user) = match identity {
            Identity::Resolving => (StorePhase::Unresolved, None),
            Identity::SignedOut => (StorePhase::NoIdentity, None),
            Identity::SignedIn(user) => (StorePhase::Loading { user: user.clone() }, Some(user)),
        };

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.phase = phase;
            s.itineraries = Arc::new(Vec::new());
        });
        tracing::debug!(generation, ?user, "identity applied to store");

        user.map(|user| LoadTicket { user, generation })
    }

    async fn complete_load(&self, ticket: LoadTicket) -> Result<(), StoreError> {
        let LoadTicket { user, generation } = ticket;

        // Let an in-flight mutation land before reading the gateway
        drop(self.mutations.lock().await);
        if !self.is_current(generation) {
            tracing::debug!(generation, user = %user, "load superseded before fetch");
            return Ok(());
        }

        let result = self.gateway.list_all(&user).await;

        match result {
            Ok(records) => {
                let count = records.len();
                let committed = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.phase = StorePhase::Ready { user: user.clone() };
                    s.itineraries = Arc::new(records);
                    true
                });
                if committed {
                    tracing::debug!(generation, user = %user, count, "itineraries loaded");
                } else {
                    tracing::debug!(generation, user = %user, "discarding stale load");
                }
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                let current = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.phase = StorePhase::Failed {
                        user: user.clone(),
                        reason: reason.clone(),
                    };
                    true
                });
                if current {
                    tracing::warn!(user = %user, error = %e, "failed to load itineraries");
                    Err(e.into())
                } else {
                    tracing::debug!(generation, user = %user, "discarding stale load failure");
                    Ok(())
                }
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    /// Identity and generation a mutation runs under
    fn require_ready(&self) -> Result<(UserId, u64), StoreError> {
        let s = self.state.borrow();
        match &s.phase {
            StorePhase::Ready { user } => Ok((user.clone(), s.generation)),
            StorePhase::Unresolved | StorePhase::NoIdentity => Err(StoreError::NotAuthenticated),
            StorePhase::Loading { .. } | StorePhase::Failed { .. } => Err(StoreError::NotReady),
        }
    }

    fn set_favorite(&self, generation: u64, id: &ItineraryId, value: bool) {
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            match Arc::make_mut(&mut s.itineraries)
                .iter_mut()
                .find(|r| &r.id == id)
            {
                Some(record) if record.is_favorite != value => {
                    record.is_favorite = value;
                    true
                }
                _ => false,
            }
        });
    }

    /// Await a gateway call under the configured deadline
    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        match self.config.mutation_timeout() {
            Some(deadline) => tokio::time::timeout(deadline, fut)
                .await
                .map_err(|_| GatewayError::Timeout(deadline.as_millis() as u64))?,
            None => fut.await,
        }
    }
}

/// Counts a mutation as in flight for as long as it lives
struct PendingMutation<'a> {
    state: &'a watch::Sender<StoreSnapshot>,
}

impl<'a> PendingMutation<'a> {
    fn start(state: &'a watch::Sender<StoreSnapshot>) -> Self {
        state.send_modify(|s| s.pending_mutations += 1);
        Self { state }
    }
}

impl Drop for PendingMutation<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.pending_mutations = s.pending_mutations.saturating_sub(1));
    }
}
