//! Identity provider handle
//!
//! The authentication provider itself is external; this is the channel it
//! publishes through. The store only ever reads from it.

use tokio::sync::watch;
use wayfarer_domain::UserId;

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// The provider has not decided yet
    Resolving,
    /// Resolved to "nobody"
    SignedOut,
    /// Resolved to a concrete user
    SignedIn(UserId),
}

impl Identity {
    /// The signed-in user, if any
    pub fn user(&self) -> Option<&UserId> {
        match self {
            Identity::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// Whether the provider is still resolving
    pub fn is_resolving(&self) -> bool {
        matches!(self, Identity::Resolving)
    }
}

/// Publishes identity changes to the store
///
/// # Examples
///
/// ```
/// use wayfarer_store::{Identity, IdentityProvider};
/// use wayfarer_domain::UserId;
///
/// let provider = IdentityProvider::new();
/// assert!(provider.current().is_resolving());
///
/// provider.sign_in(UserId::new("alice"));
/// assert_eq!(provider.current().user(), Some(&UserId::new("alice")));
/// ```
#[derive(Debug)]
pub struct IdentityProvider {
    tx: watch::Sender<Identity>,
}

impl IdentityProvider {
    /// Create a provider in the `Resolving` state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Identity::Resolving);
        Self { tx }
    }

    /// Report a signed-in user
    pub fn sign_in(&self, user: UserId) {
        self.publish(Identity::SignedIn(user));
    }

    /// Report that nobody is signed in
    pub fn sign_out(&self) {
        self.publish(Identity::SignedOut);
    }

    /// Report that the identity is being resolved again
    pub fn set_resolving(&self) {
        self.publish(Identity::Resolving);
    }

    /// Current identity
    pub fn current(&self) -> Identity {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every change
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.tx.subscribe()
    }

    fn publish(&self, identity: Identity) {
        tracing::debug!(?identity, "identity changed");
        self.tx.send_replace(identity);
    }
}

impl Default for IdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let provider = IdentityProvider::new();
        let mut rx = provider.subscribe();

        provider.sign_in(UserId::from("alice"));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Identity::SignedIn(UserId::from("alice")));

        provider.sign_out();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Identity::SignedOut);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let provider = IdentityProvider::new();
        provider.sign_out();
        assert_eq!(provider.current(), Identity::SignedOut);
    }
}
