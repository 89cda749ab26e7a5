//! Signed-in itinerary session for one command.

use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use wayfarer_domain::traits::PersistenceGateway;
use wayfarer_domain::{ItineraryId, ItineraryRecord, UserId};
use wayfarer_gateway::SqliteGateway;
use wayfarer_store::{IdentityProvider, ItineraryStore, StoreConfig, StoreError, StorePhase};

/// A store loaded for the active profile's user
pub struct Session {
    store: Arc<ItineraryStore>,
    identity: IdentityProvider,
    follower: JoinHandle<()>,
}

impl Session {
    /// Open the active profile's database and sign its user in.
    pub async fn open(config: &Config) -> Result<Self> {
        let profile = config.get_active_profile()?;
        Self::open_profile(profile, config.store.clone()).await
    }

    /// Open `profile`'s database and sign its user in.
    pub async fn open_profile(profile: &Profile, store_config: StoreConfig) -> Result<Self> {
        if let Some(parent) = profile.database.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let gateway = SqliteGateway::new(&profile.database)
            .map_err(|e| CliError::Open(format!("{}: {}", profile.database.display(), e)))?;

        Self::with_gateway(Arc::new(gateway), UserId::new(&profile.user_id), store_config).await
    }

    /// Sign `user` in against an existing gateway and wait for the load.
    pub async fn with_gateway(
        gateway: Arc<dyn PersistenceGateway>,
        user: UserId,
        store_config: StoreConfig,
    ) -> Result<Self> {
        let identity = IdentityProvider::new();
        let store = Arc::new(ItineraryStore::with_config(gateway, store_config));
        let follower = store.follow(identity.subscribe());

        identity.sign_in(user);
        let snapshot = store.settled().await;
        match snapshot.phase {
            StorePhase::Ready { user } => {
                tracing::debug!(user = %user, count = snapshot.itineraries.len(), "session ready");
            }
            StorePhase::Failed { reason, .. } => return Err(CliError::Open(reason)),
            other => return Err(CliError::Open(format!("store is {}", other))),
        }

        Ok(Self {
            store,
            identity,
            follower,
        })
    }

    /// The loaded store.
    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    /// Look up an itinerary, failing with `NotFound` if it is not loaded.
    pub fn require(&self, id: &str) -> Result<ItineraryRecord> {
        let id = ItineraryId::from(id);
        self.store
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id).into())
    }

    /// Sign out and stop following identity changes.
    pub async fn close(self) {
        self.identity.sign_out();
        drop(self.identity);
        if let Err(e) = self.follower.await {
            tracing::debug!(error = %e, "identity follower ended abnormally");
        }
    }
}
