//! Session Store: per-candidate interview state, keyed by session id.
//!
//! Each session sits behind its own async mutex: requests for one candidate are
//! serialised (so at most one generator call is in flight per session), while
//! different candidates never contend or share mutable state.
//!
//! Every lookup refreshes the entry's last-seen instant; `purge_idle` drops
//! sessions nobody has touched within the idle TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::interview::InterviewSession;

pub type SessionHandle = Arc<Mutex<InterviewSession>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session in `Start` and returns its id and handle.
    pub fn create(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(InterviewSession::new(id)));
        self.sessions.insert(
            id,
            SessionEntry {
                handle: Arc::clone(&handle),
                last_seen: Instant::now(),
            },
        );
        info!(session_id = %id, "Session created");
        (id, handle)
    }

    /// Looks up a session and marks it as seen.
    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        // clone the handle out so the shard lock is released before any await
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen = Instant::now();
            Arc::clone(&entry.handle)
        })
    }

    /// Returns the session to a fresh `Start` state under the same id.
    pub async fn reset(&self, id: &Uuid) -> bool {
        let Some(handle) = self.get(id) else {
            return false;
        };
        handle.lock().await.reset();
        info!(session_id = %id, "Session reset");
        true
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Drops every session not looked up within `idle_ttl`. Returns how many were dropped.
    ///
    /// Handles already cloned out by in-flight requests stay valid until those
    /// requests finish.
    pub fn purge_idle(&self, idle_ttl: Duration) -> usize {
        let before = self.sessions.len();
        let now = Instant::now();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_seen) < idle_ttl);
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            info!(purged, remaining = self.sessions.len(), "Idle sessions purged");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::{Phase, Question};

    #[tokio::test]
    async fn test_create_then_get_returns_same_session() {
        let store = SessionStore::new();
        let (id, handle) = store.create();

        let fetched = store.get(&id).unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
        assert_eq!(fetched.lock().await.id, id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        assert!(SessionStore::new().get(&Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn test_reset_returns_to_start() {
        let store = SessionStore::new();
        let (id, handle) = store.create();
        {
            let mut session = handle.lock().await;
            session.phase = Phase::Interviewing;
            session.questions.push(Question::base("Why Rust?"));
        }

        assert!(store.reset(&id).await);

        let session = handle.lock().await;
        assert_eq!(session.phase, Phase::Start);
        assert!(session.questions.is_empty());
        assert_eq!(session.id, id);
    }

    #[tokio::test]
    async fn test_reset_unknown_is_false() {
        assert!(!SessionStore::new().reset(&Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let (a, handle_a) = store.create();
        let (b, _) = store.create();
        assert_ne!(a, b);

        handle_a.lock().await.phase = Phase::Complete;

        assert_eq!(store.get(&b).unwrap().lock().await.phase, Phase::Start);
    }

    #[tokio::test]
    async fn test_purge_idle_drops_untouched_sessions() {
        let store = SessionStore::new();
        let (id, handle) = store.create();

        assert_eq!(store.purge_idle(Duration::from_secs(3600)), 0);
        assert!(store.get(&id).is_some());

        assert_eq!(store.purge_idle(Duration::ZERO), 1);
        assert!(store.get(&id).is_none());
        assert_eq!(store.len(), 0);

        // a handle held by a request outlives the purge
        assert_eq!(handle.lock().await.id, id);
    }

    #[tokio::test]
    async fn test_lookup_refreshes_idle_clock() {
        let store = SessionStore::new();
        let (stale, _) = store.create();
        let (fresh, _) = store.create();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.get(&fresh).is_some());

        assert_eq!(store.purge_idle(Duration::from_millis(40)), 1);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&fresh).is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let (id, _) = store.create();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
        assert_eq!(store.len(), 0);
    }
}
