//! Identity provider seam
//!
//! Authentication is delegated to an external collaborator reached through
//! the [`IdentityProvider`] trait. Consumers observe the signed-in state
//! through a watch channel rather than polling.

use crate::error::Result;
use crate::types::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id, scopes all store collections
    pub uid: UserId,
    /// Display name
    pub display_name: String,
    /// Avatar image url, when the provider supplies one
    pub avatar_url: Option<String>,
}

/// Session lifecycle of the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in, returning the established identity
    async fn sign_in(&self) -> Result<Identity>;

    /// Sign out
    async fn sign_out(&self) -> Result<()>;

    /// Observe the current identity; `None` while signed out
    fn watch_identity(&self) -> watch::Receiver<Option<Identity>>;
}
