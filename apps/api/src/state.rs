use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::interview::models::{CandidateProfile, ScoredResult};
use crate::interview::session::InterviewSession;
use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion collaborator. Default: `LlmClient`; tests inject a scripted fake.
    pub completion: Arc<dyn Completion>,
    /// Document text extractor. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    pub sessions: SessionStore,
    pub config: Config,
}

/// Everything one candidate's run owns.
#[derive(Debug)]
pub struct InterviewRecord {
    pub session: InterviewSession,
    pub profile: Option<CandidateProfile>,
    /// Filled the first time the summary is requested.
    pub result: Option<ScoredResult>,
    pub created_at: DateTime<Utc>,
}

impl InterviewRecord {
    pub fn new() -> Self {
        Self {
            session: InterviewSession::start(),
            profile: None,
            result: None,
            created_at: Utc::now(),
        }
    }

    /// External restart: back to a fresh Upload phase.
    pub fn restart(&mut self) {
        self.session.restart();
        self.profile = None;
        self.result = None;
    }
}

impl Default for InterviewRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Interview records keyed by id.
///
/// Each record sits behind its own mutex, held for the whole of an action,
/// so a session only ever has one outstanding action. Records are never
/// shared between sessions.
///
/// A record untouched for longer than the store's TTL is evicted, either by
/// `evict_expired` or lazily when it is looked up.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, StoreEntry>>>,
    ttl: Duration,
}

struct StoreEntry {
    record: Arc<Mutex<InterviewRecord>>,
    last_seen: Instant,
}

impl StoreEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) > ttl
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> (Uuid, Arc<Mutex<InterviewRecord>>) {
        let id = Uuid::new_v4();
        let record = Arc::new(Mutex::new(InterviewRecord::new()));
        let entry = StoreEntry {
            record: record.clone(),
            last_seen: Instant::now(),
        };
        self.inner.write().await.insert(id, entry);
        (id, record)
    }

    /// Looks up a live record and refreshes its idle timer.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<InterviewRecord>>> {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let expired = sessions.get(&id)?.is_expired(now, self.ttl);
        if expired {
            sessions.remove(&id);
            debug!("Interview {id} expired on lookup");
            return None;
        }
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = now;
        Some(entry.record.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Drops every record idle for longer than the TTL. Returns how many went.
    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.ttl));
        before - sessions.len()
    }

    pub async fn active_count(&self) -> usize {
        self.inner.read().await.len()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Periodically evicts idle interviews until the process exits.
pub async fn run_session_sweeper(sessions: SessionStore) {
    let period = (sessions.ttl() / 4).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let evicted = sessions.evict_expired().await;
        if evicted > 0 {
            info!(
                "Evicted {evicted} idle interviews, {} still active",
                sessions.active_count().await
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::Phase;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_store_create_get_remove() {
        let store = SessionStore::new(TTL);
        let (id, _) = store.create().await;
        assert_eq!(store.active_count().await, 1);

        let record = store.get(id).await.unwrap();
        assert_eq!(record.lock().await.session.phase(), Phase::Upload);

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new(TTL);
        let (a, _) = store.create().await;
        let (b, _) = store.create().await;
        assert_ne!(a, b);

        store.get(a).await.unwrap().lock().await.result = Some(ScoredResult {
            correct_count: 1,
            total_questions: 10,
            summary_text: String::new(),
        });
        assert!(store.get(b).await.unwrap().lock().await.result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_evicted_after_ttl() {
        let store = SessionStore::new(TTL);
        for _ in 0..100 {
            store.create().await;
        }
        assert_eq!(store.active_count().await, 100);

        tokio::time::advance(TTL / 2).await;
        assert_eq!(store.evict_expired().await, 0);

        tokio::time::advance(TTL).await;
        let (fresh, _) = store.create().await;
        assert_eq!(store.evict_expired().await, 100);
        assert_eq!(store.active_count().await, 1);
        assert!(store.get(fresh).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_refreshes_idle_timer() {
        let store = SessionStore::new(TTL);
        let (kept, _) = store.create().await;
        let (dropped, _) = store.create().await;

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(store.get(kept).await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get(dropped).await.is_none());
        assert!(store.get(kept).await.is_some());
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_in_background() {
        let store = SessionStore::new(TTL);
        store.create().await;
        let sweeper = tokio::spawn(run_session_sweeper(store.clone()));

        tokio::time::sleep(TTL * 2).await;
        assert_eq!(store.active_count().await, 0);
        sweeper.abort();
    }
}
