//! In-memory gateway with fault injection
//!
//! Keeps every owner's records in a shared map. Clones share state, so a
//! test can keep a handle for inspection and scripting while the store owns
//! another.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use wayfarer_domain::traits::PersistenceGateway;
use wayfarer_domain::{GatewayError, ItineraryId, ItineraryPatch, ItineraryRecord, UserId};

/// Gateway operation, used to target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    /// `add`
    Add,
    /// `list_all`
    ListAll,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<UserId, Vec<ItineraryRecord>>,
    failures: HashMap<GatewayOp, VecDeque<String>>,
    calls: HashMap<GatewayOp, usize>,
    next_id: u64,
}

/// In-process implementation of `PersistenceGateway`
///
/// # Examples
///
/// ```
/// use wayfarer_gateway::{GatewayOp, MemoryGateway};
///
/// let gateway = MemoryGateway::new().with_assigned_ids();
/// gateway.fail_next(GatewayOp::Delete, "backend offline");
/// assert_eq!(gateway.call_count(GatewayOp::Delete), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Inner>>,
    assign_ids: bool,
    latency: Option<Duration>,
}

impl MemoryGateway {
    /// Create an empty gateway that keeps the ids it is given
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `mem-N` ids on `add` instead of keeping the caller's id
    pub fn with_assigned_ids(mut self) -> Self {
        self.assign_ids = true;
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Replace `owner`'s records, newest first
    pub fn seed(&self, owner: &UserId, records: Vec<ItineraryRecord>) {
        self.lock().records.insert(owner.clone(), records);
    }

    /// Snapshot of `owner`'s stored records, newest first
    pub fn records(&self, owner: &UserId) -> Vec<ItineraryRecord> {
        self.lock().records.get(owner).cloned().unwrap_or_default()
    }

    /// Make the next call of `op` fail with `message`
    ///
    /// Failures queue up: calling this twice fails the next two calls.
    pub fn fail_next(&self, op: GatewayOp, message: impl Into<String>) {
        self.lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(message.into());
    }

    /// How many times `op` has been called
    pub fn call_count(&self, op: GatewayOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking test thread must not wedge every other handle
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call, wait out the latency, and pop an injected failure
    async fn enter(&self, op: GatewayOp) -> Result<(), GatewayError> {
        *self.lock().calls.entry(op).or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self
            .lock()
            .failures
            .get_mut(&op)
            .and_then(VecDeque::pop_front);
        match failure {
            Some(message) => Err(GatewayError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn add(
        &self,
        owner: &UserId,
        record: &ItineraryRecord,
    ) -> Result<ItineraryId, GatewayError> {
        self.enter(GatewayOp::Add).await?;

        let mut inner = self.lock();
        let id = if self.assign_ids {
            inner.next_id += 1;
            ItineraryId::new(format!("mem-{}", inner.next_id))
        } else {
            record.id.clone()
        };

        let records = inner.records.entry(owner.clone()).or_default();
        if records.iter().any(|r| r.id == id) {
            return Err(GatewayError::Duplicate(id.to_string()));
        }

        let mut stored = record.clone();
        stored.id = id.clone();
        stored.owner = owner.clone();
        records.insert(0, stored);
        Ok(id)
    }

    async fn list_all(&self, owner: &UserId) -> Result<Vec<ItineraryRecord>, GatewayError> {
        self.enter(GatewayOp::ListAll).await?;
        Ok(self.records(owner))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &ItineraryId,
        patch: &ItineraryPatch,
    ) -> Result<(), GatewayError> {
        self.enter(GatewayOp::Update).await?;

        let mut inner = self.lock();
        let record = inner
            .records
            .get_mut(owner)
            .and_then(|records| records.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        record.apply(patch);
        Ok(())
    }

    async fn delete(&self, owner: &UserId, id: &ItineraryId) -> Result<(), GatewayError> {
        self.enter(GatewayOp::Delete).await?;

        let mut inner = self.lock();
        let records = inner
            .records
            .get_mut(owner)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
