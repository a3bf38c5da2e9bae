use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{Favorites, Store, Theme};
use crate::view::SearchView;

/// Everything one browser owns: its search view and its two stores.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub view: SearchView,
    pub favorites: Store<Favorites>,
    pub theme: Store<Theme>,
    pub lastused: DateTime<Utc>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            view: SearchView::default(),
            favorites: Store::default(),
            theme: Store::default(),
            lastused: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.lastused = Utc::now();
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: Duration::seconds(idle_timeout_secs.min(u64::from(u32::MAX)) as i64),
        }
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn create(&self) -> SharedSession {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(id)));
        self.sessions.write().await.insert(id, session.clone());
        debug!(session = %id, "Created session");
        session
    }

    /// Look up the session for `id`, or start a new one. The flag is true
    /// when the session was created here and the client needs its cookie.
    pub async fn resolve(&self, id: Option<Uuid>) -> (SharedSession, bool) {
        if let Some(id) = id {
            if let Some(session) = self.get(&id).await {
                return (session, false);
            }
        }
        (self.create().await, true)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the timeout. Sessions that are
    /// locked right now are in use and kept.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(s) => now - s.lastused <= self.idle_timeout,
            Err(_) => true,
        });
        before - sessions.len()
    }

    pub fn start_background_sweep(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));
            loop {
                interval.tick().await;
                let removed = self.sweep(Utc::now()).await;
                if removed > 0 {
                    info!(removed, "Expired idle sessions");
                }
            }
        });
    }
}
