//! Session resolver port.

use async_trait::async_trait;
use uuid::Uuid;

/// Server-side session store mapping opaque tokens to user identities.
///
/// Sessions never touch the content repositories; resolving a token yields
/// only a user id, which callers look up themselves when they need the
/// full account.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issue a fresh opaque token for the user, invalidating any token
    /// previously issued to the same user.
    async fn start(&self, user_id: Uuid) -> String;

    /// Resolve a token to a user id. Absent or expired tokens are anonymous.
    async fn resolve(&self, token: &str) -> Option<Uuid>;

    /// Invalidate a token immediately.
    async fn end(&self, token: &str);
}
