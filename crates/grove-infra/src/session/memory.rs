//! In-memory session store.
//!
//! Server-side sessions keyed by an opaque token. Note: sessions are lost
//! on process restart, which matches the single-process deployment model.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use grove_core::ports::SessionStore;

struct SessionEntry {
    user_id: Uuid,
    expires_at: Instant,
}

/// In-memory session store using a HashMap behind an async RwLock.
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &SessionEntry) -> bool {
        Instant::now() > entry.expires_at
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn start(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();

        let mut sessions = self.sessions.write().await;
        // One live session per user: drop any token previously issued.
        sessions.retain(|_, entry| entry.user_id != user_id);
        sessions.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at: Instant::now() + self.ttl,
            },
        );

        token
    }

    async fn resolve(&self, token: &str) -> Option<Uuid> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(token)?;

        if Self::is_expired(entry) {
            drop(sessions);
            // Clean up the expired entry with a write lock.
            let mut sessions = self.sessions.write().await;
            sessions.remove(token);
            return None;
        }

        Some(entry.user_id)
    }

    async fn end(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_and_resolve() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let user_id = Uuid::new_v4();

        let token = store.start(user_id).await;
        assert_eq!(store.resolve(&token).await, Some(user_id));
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert_eq!(store.resolve("no-such-token").await, None);
    }

    #[tokio::test]
    async fn end_invalidates_immediately() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = store.start(Uuid::new_v4()).await;

        store.end(&token).await;
        assert_eq!(store.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn starting_again_invalidates_prior_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let user_id = Uuid::new_v4();

        let first = store.start(user_id).await;
        let second = store.start(user_id).await;

        assert_eq!(store.resolve(&first).await, None);
        assert_eq!(store.resolve(&second).await, Some(user_id));
    }

    #[tokio::test]
    async fn expired_token_is_anonymous() {
        let store = InMemorySessionStore::new(Duration::from_millis(10));
        let token = store.start(Uuid::new_v4()).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.resolve(&token).await, None);
    }
}
