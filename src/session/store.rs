use crate::config::SessionConfig;
use crate::models::PredictionHistory;
use moka::future::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// History owned by one session; locked for the duration of each action
pub type SessionHistory = Arc<Mutex<PredictionHistory>>;

/// A resolved session
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    pub history: SessionHistory,
    /// True when the caller did not present a session id
    pub is_new: bool,
}

/// Session-scoped prediction histories backed by Moka.
///
/// Sessions idle past the configured timeout are evicted together with
/// their history; nothing outlives its session.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, SessionHistory>,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_limits(config.max_sessions, config.idle_timeout())
    }

    pub fn with_limits(max_sessions: u64, idle_timeout: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();

        Self { cache }
    }

    /// Resolve the session for `id`.
    ///
    /// Only ids this store issued and still holds are honoured; anything else
    /// gets a freshly minted id and an empty history.
    pub async fn resolve(&self, id: Option<Uuid>) -> Session {
        if let Some(id) = id {
            if let Some(history) = self.get(&id).await {
                return Session {
                    id,
                    history,
                    is_new: false,
                };
            }
            tracing::debug!(session_id = %id, "Unknown or expired session id");
        }

        let id = Uuid::new_v4();
        let history: SessionHistory = Arc::new(Mutex::new(PredictionHistory::new()));
        self.cache.insert(id, history.clone()).await;
        tracing::debug!(session_id = %id, "Created session");

        Session {
            id,
            history,
            is_new: true,
        }
    }

    /// Look up an existing session without creating one
    pub async fn get(&self, id: &Uuid) -> Option<SessionHistory> {
        self.cache.get(id).await
    }

    pub fn session_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
