//! Local identity provider
//!
//! Stand-in for an external identity service: a fixed, configured identity
//! that flips the watched state between signed-in and signed-out. Used by
//! tests and single-user deployments.

use async_trait::async_trait;
use cuelist_core::{Identity, IdentityProvider, Result};
use tokio::sync::watch;

/// Identity provider backed by one configured identity
pub struct LocalIdentityProvider {
    identity: Identity,
    state: watch::Sender<Option<Identity>>,
}

impl LocalIdentityProvider {
    /// Create a provider in the signed-out state
    pub fn new(identity: Identity) -> Self {
        let (state, _) = watch::channel(None);
        Self { identity, state }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> Result<Identity> {
        let _ = self.state.send(Some(self.identity.clone()));
        Ok(self.identity.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        let _ = self.state.send(None);
        Ok(())
    }

    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelist_core::types::UserId;

    fn identity() -> Identity {
        Identity {
            uid: UserId::new("user-1"),
            display_name: "Test User".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn sign_in_and_out_drive_the_watched_state() {
        let provider = LocalIdentityProvider::new(identity());
        let rx = provider.watch_identity();
        assert!(rx.borrow().is_none());

        let signed_in = provider.sign_in().await.unwrap();
        assert_eq!(signed_in.uid, UserId::new("user-1"));
        assert_eq!(rx.borrow().as_ref().map(|i| i.uid.clone()), Some(signed_in.uid));

        provider.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
